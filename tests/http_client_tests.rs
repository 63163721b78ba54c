//! HTTP 数据源 client 测试（本地应答器，不访问外网）

mod common;

use std::time::Duration;

use common::{closed_port_addr, spawn_responder};
use nwo_lookup::services::geoip::{
    HttpProviderClient, NoopProgress, ProviderClient, ProviderResult, ProviderSchema, ProviderSpec,
};

fn local_spec(addr: std::net::SocketAddr) -> ProviderSpec {
    ProviderSpec {
        name: "Local".to_string(),
        schema: ProviderSchema::IpInfo,
        url_template: format!("http://{}/lookup/{{ip}}/json", addr),
        timeout: Duration::from_secs(5),
    }
}

async fn query(spec: &ProviderSpec, ip: &str) -> ProviderResult {
    HttpProviderClient::new()
        .query(spec, ip, &NoopProgress)
        .await
}

#[cfg(test)]
mod http_client_tests {
    use super::*;

    #[tokio::test]
    async fn test_ok_json_object_is_success() {
        let (addr, handle) = spawn_responder("200 OK", r#"{"ip":"1.1.1.1","city":"Sydney"}"#);
        let result = query(&local_spec(addr), "1.1.1.1").await;

        let payload = result.payload().expect("success payload");
        assert_eq!(payload["city"], "Sydney");

        // 请求路径中包含目标 IP
        let request = handle.join().unwrap();
        assert!(request.starts_with("GET /lookup/1.1.1.1/json"), "{}", request);
    }

    #[tokio::test]
    async fn test_non_200_status_is_failure() {
        let (addr, _handle) = spawn_responder("500 Internal Server Error", r#"{"error":"boom"}"#);
        let result = query(&local_spec(addr), "1.1.1.1").await;
        assert_eq!(result, ProviderResult::failure("status code = 500"));
    }

    #[tokio::test]
    async fn test_rate_limited_status_is_failure() {
        let (addr, _handle) = spawn_responder("429 Too Many Requests", "{}");
        let result = query(&local_spec(addr), "1.1.1.1").await;
        assert_eq!(result.failure_reason(), Some("status code = 429"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_failure() {
        let (addr, _handle) = spawn_responder("200 OK", "<html>not json</html>");
        let result = query(&local_spec(addr), "1.1.1.1").await;
        assert_eq!(result.failure_reason(), Some("invalid response body"));
    }

    #[tokio::test]
    async fn test_non_object_json_is_failure() {
        let (addr, _handle) = spawn_responder("200 OK", "[1, 2, 3]");
        let result = query(&local_spec(addr), "1.1.1.1").await;
        assert_eq!(result.failure_reason(), Some("invalid response body"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_exception() {
        let result = query(&local_spec(closed_port_addr()), "1.1.1.1").await;
        let reason = result.failure_reason().expect("failure");
        assert!(reason.starts_with("exception: "), "{}", reason);
    }
}
