//! 查询编排
//!
//! 校验 IP -> 并发查询所有数据源（每个数据源一个任务）-> 等待全部结束或整体截止 -> 合并。

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::aggregator::{Aggregator, ProviderResults};
use super::external_api::HttpProviderClient;
use super::progress::{LookupEvent, ProgressSink};
use super::provider::{ProviderClient, ProviderResult, ProviderSpec, RawResponse};
use super::record::CanonicalRecord;
use super::schema::ProviderSchema;
use crate::config::StaticConfig;
use crate::errors::{LookupError, Result};
use crate::utils::ip::parse_ip_literal;

/// 整体截止时间到达时仍未完成的数据源的失败原因
pub const DEADLINE_EXCEEDED: &str = "exception: deadline exceeded";

/// 单个数据源的查询结果（带名称与 schema，按优先级排列）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderOutcome {
    pub provider: String,
    pub schema: ProviderSchema,
    #[serde(flatten)]
    pub result: ProviderResult,
}

/// 一次查询的完整结果，供展示层只读使用
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupReport {
    ip: IpAddr,
    record: CanonicalRecord,
    outcomes: Vec<ProviderOutcome>,
}

impl LookupReport {
    pub fn new(ip: IpAddr, record: CanonicalRecord, outcomes: Vec<ProviderOutcome>) -> Self {
        Self {
            ip,
            record,
            outcomes,
        }
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn record(&self) -> &CanonicalRecord {
        &self.record
    }

    pub fn outcomes(&self) -> &[ProviderOutcome] {
        &self.outcomes
    }

    /// 成功数据源的原始响应（按优先级）
    pub fn raw_payloads(&self) -> impl Iterator<Item = (&ProviderOutcome, &RawResponse)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.payload().map(|p| (o, p)))
    }

    /// 失败数据源及原因（按优先级）
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.failure_reason().map(|r| (o.provider.as_str(), r)))
    }

    pub fn has_data(&self) -> bool {
        !self.record.is_empty()
    }
}

pub struct LookupService {
    client: Arc<dyn ProviderClient>,
    providers: Vec<ProviderSpec>,
    aggregator: Aggregator,
    deadline: Duration,
}

impl LookupService {
    /// `providers` 的顺序即合并优先级
    pub fn new(
        client: Arc<dyn ProviderClient>,
        providers: Vec<ProviderSpec>,
        deadline: Duration,
    ) -> Self {
        let aggregator = Aggregator::from_specs(&providers);
        Self {
            client,
            providers,
            aggregator,
            deadline,
        }
    }

    /// 根据配置初始化（HTTP client）
    pub fn from_config(config: &StaticConfig) -> Result<Self> {
        let providers = config.provider_specs()?;
        let deadline = config.lookup_deadline(&providers);
        let client: Arc<dyn ProviderClient> = Arc::new(HttpProviderClient::new());

        info!(
            "Lookup: {} providers via {} client, deadline {:?}",
            providers.len(),
            client.name(),
            deadline
        );
        Ok(Self::new(client, providers, deadline))
    }

    pub fn providers(&self) -> &[ProviderSpec] {
        &self.providers
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// 查询一个 IP
    ///
    /// 非法 IP 在发出任何请求之前返回 `LookupError::InvalidIp`。
    /// 数据源的失败不会变成错误，只会体现在报告的 failures 中。
    ///
    /// 丢弃返回的 future 会中止所有未完成的数据源任务。
    pub async fn lookup(&self, input: &str, progress: Arc<dyn ProgressSink>) -> Result<LookupReport> {
        let ip = parse_ip_literal(input)?;
        if self.providers.is_empty() {
            return Err(LookupError::provider_registry("No provider configured"));
        }

        let mut results = self.query_all(&ip.to_string(), progress).await;
        let record = self.aggregator.merge(&results);

        let outcomes = self
            .providers
            .iter()
            .map(|spec| ProviderOutcome {
                provider: spec.name.clone(),
                schema: spec.schema,
                result: results
                    .remove(&spec.name)
                    .unwrap_or_else(|| ProviderResult::failure(DEADLINE_EXCEEDED)),
            })
            .collect();

        Ok(LookupReport::new(ip, record, outcomes))
    }

    /// 每个数据源一个任务，全部到达终态（或整体截止）后返回
    async fn query_all(&self, ip: &str, progress: Arc<dyn ProgressSink>) -> ProviderResults {
        let mut tasks = JoinSet::new();
        let mut names = HashMap::with_capacity(self.providers.len());

        for spec in self.providers.iter().cloned() {
            let client = Arc::clone(&self.client);
            let progress = Arc::clone(&progress);
            let ip = ip.to_string();
            let name = spec.name.clone();
            let handle = tasks.spawn(async move {
                let result = client.query(&spec, &ip, progress.as_ref()).await;
                (spec.name, result)
            });
            names.insert(handle.id(), name);
        }

        let mut results = ProviderResults::with_capacity(self.providers.len());
        let join_all = async {
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((name, result)) => {
                        results.insert(name, result);
                    }
                    Err(e) => {
                        let name = names.get(&e.id()).cloned().unwrap_or_default();
                        warn!("Provider task {} ended abnormally: {}", name, e);
                        let reason = format!("exception: {}", e);
                        progress.notify(&LookupEvent::Failed {
                            provider: name.clone(),
                            reason: reason.clone(),
                        });
                        results.insert(name, ProviderResult::failure(reason));
                    }
                }
            }
        };

        if timeout(self.deadline, join_all).await.is_err() {
            warn!(
                "Lookup deadline of {:?} exceeded, aborting {} pending providers",
                self.deadline,
                tasks.len()
            );
            tasks.abort_all();
        }

        for spec in &self.providers {
            if !results.contains_key(&spec.name) {
                progress.notify(&LookupEvent::Failed {
                    provider: spec.name.clone(),
                    reason: DEADLINE_EXCEEDED.to_string(),
                });
                results.insert(spec.name.clone(), ProviderResult::failure(DEADLINE_EXCEEDED));
            }
        }

        debug!(
            "Lookup for {} finished: {}/{} providers succeeded",
            ip,
            results.values().filter(|r| r.is_success()).count(),
            results.len()
        );
        results
    }
}
