//! 外部 HTTP API 数据源实现
//!
//! 使用 ureq 同步请求，在 tokio 的 blocking 线程池中执行。
//! 所有错误都在这里收敛为 `ProviderResult::Failure`，不会向上传播。

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{trace, warn};
use ureq::Agent;

use super::progress::{LookupEvent, ProgressSink};
use super::provider::{ProviderClient, ProviderResult, ProviderSpec};

/// 默认 HTTP 请求超时时间（单个请求可覆盖）
const HTTP_TIMEOUT_SECS: u64 = 10;

/// 全局 HTTP Agent（ureq 的 Agent 是 Send + Sync）
static HTTP_AGENT: OnceLock<Agent> = OnceLock::new();

fn get_agent() -> &'static Agent {
    HTTP_AGENT.get_or_init(|| {
        Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(HTTP_TIMEOUT_SECS)))
            // 非 2xx 也作为普通响应返回，由我们统一映射为 "status code = N"
            .http_status_as_error(false)
            .build()
            .into()
    })
}

/// 基于 HTTP GET 的数据源 client
#[derive(Clone)]
pub struct HttpProviderClient {
    agent: Agent,
}

impl Default for HttpProviderClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpProviderClient {
    /// 使用全局共享的 Agent
    pub fn new() -> Self {
        Self {
            agent: get_agent().clone(),
        }
    }

    /// 执行一次 GET（同步，在 spawn_blocking 中调用）
    fn fetch_sync(agent: &Agent, url: &str, timeout: Duration) -> ProviderResult {
        let resp = match agent
            .get(url)
            .config()
            .timeout_global(Some(timeout))
            .build()
            .call()
        {
            Ok(r) => r,
            Err(e) => {
                warn!("Provider request to \"{}\" failed: {}", url, e);
                return ProviderResult::failure(format!("exception: {}", e));
            }
        };

        let status = resp.status().as_u16();
        if status != 200 {
            trace!("Provider \"{}\" answered with status {}", url, status);
            return ProviderResult::failure(format!("status code = {}", status));
        }

        match resp.into_body().read_json::<Value>() {
            Ok(Value::Object(map)) => ProviderResult::success(map),
            Ok(other) => {
                warn!(
                    "Provider response from \"{}\" is not a JSON object: {}",
                    url, other
                );
                ProviderResult::failure("invalid response body")
            }
            Err(e) => {
                warn!("Provider response from \"{}\" parse failed: {}", url, e);
                ProviderResult::failure("invalid response body")
            }
        }
    }
}

#[async_trait]
impl ProviderClient for HttpProviderClient {
    async fn query(
        &self,
        provider: &ProviderSpec,
        ip: &str,
        progress: &dyn ProgressSink,
    ) -> ProviderResult {
        let url = provider.endpoint(ip);
        let timeout = provider.timeout;
        let agent = self.agent.clone();

        progress.notify(&LookupEvent::Querying {
            provider: provider.name.clone(),
        });

        let result =
            tokio::task::spawn_blocking(move || Self::fetch_sync(&agent, &url, timeout))
                .await
                .unwrap_or_else(|e| {
                    warn!("Provider spawn_blocking failed: {}", e);
                    ProviderResult::failure(format!("exception: {}", e))
                });

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
        "HTTP"
    }
}
