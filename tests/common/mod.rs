//! 集成测试公共工具
//!
//! - 可编排的 ProviderClient 测试替身（记录调用次数）
//! - 本地一次性 HTTP 应答器（不依赖外部网络）

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use nwo_lookup::services::LookupService;
use nwo_lookup::services::geoip::{
    LookupEvent, ProgressSink, ProviderClient, ProviderResult, ProviderSchema, ProviderSpec,
    RawResponse,
};

/// JSON 对象 -> RawResponse
pub fn payload(value: Value) -> RawResponse {
    match value {
        Value::Object(map) => map,
        other => panic!("test payload must be an object, got {other}"),
    }
}

pub fn success(value: Value) -> ProviderResult {
    ProviderResult::success(payload(value))
}

pub fn spec(name: &str, schema: ProviderSchema) -> ProviderSpec {
    ProviderSpec {
        name: name.to_string(),
        schema,
        url_template: format!("http://{}.invalid/{{ip}}", name.to_lowercase()),
        timeout: Duration::from_secs(1),
    }
}

/// 默认的两个数据源（优先级：IP-API > IPInfo）
pub fn default_specs() -> Vec<ProviderSpec> {
    vec![
        spec("IP-API", ProviderSchema::IpApi),
        spec("IPInfo", ProviderSchema::IpInfo),
    ]
}

/// 单个数据源的预设行为
#[derive(Clone)]
pub enum Scripted {
    Reply(ProviderResult),
    Delayed(Duration, ProviderResult),
    Panic,
}

/// 按数据源名称返回预设结果的 client
#[derive(Default)]
pub struct ScriptedClient {
    script: HashMap<String, Scripted>,
    calls: AtomicUsize,
    seen_ips: parking_lot::Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: &str, behaviour: Scripted) -> Self {
        self.script.insert(provider.to_string(), behaviour);
        self
    }

    pub fn reply(self, provider: &str, result: ProviderResult) -> Self {
        self.with(provider, Scripted::Reply(result))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_ips(&self) -> Vec<String> {
        self.seen_ips.lock().clone()
    }
}

#[async_trait]
impl ProviderClient for ScriptedClient {
    async fn query(
        &self,
        provider: &ProviderSpec,
        ip: &str,
        progress: &dyn ProgressSink,
    ) -> ProviderResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_ips.lock().push(ip.to_string());
        progress.notify(&LookupEvent::Querying {
            provider: provider.name.clone(),
        });

        let result = match self.script.get(&provider.name).cloned() {
            Some(Scripted::Reply(result)) => result,
            Some(Scripted::Delayed(delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            Some(Scripted::Panic) => panic!("scripted provider panic"),
            None => ProviderResult::failure("exception: unscripted provider"),
        };

        let event = match &result {
            ProviderResult::Success { .. } => LookupEvent::Succeeded {
                provider: provider.name.clone(),
            },
            ProviderResult::Failure { reason } => LookupEvent::Failed {
                provider: provider.name.clone(),
                reason: reason.clone(),
            },
        };
        progress.notify(&event);
        result
    }

    fn name(&self) -> &'static str {
        "Scripted"
    }
}

/// 用测试替身构建 LookupService
pub fn service_with(client: Arc<ScriptedClient>, deadline: Duration) -> LookupService {
    LookupService::new(client, default_specs(), deadline)
}

/// 启动一次性 HTTP 应答器：接受一个连接，返回固定响应
///
/// 返回监听地址，以及收到的请求头（join 后可读取）。
pub fn spawn_responder(status_line: &str, body: &str) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local responder");
    let addr = listener.local_addr().expect("local addr");
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );

    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.flush();
        String::from_utf8_lossy(&request).into_owned()
    });

    (addr, handle)
}

/// 一个当前没有监听者的本地端口
pub fn closed_port_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    addr
}
