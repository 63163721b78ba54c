//! Provider 抽象层
//!
//! 定义单个数据源的静态描述（ProviderSpec）、单次查询的结果（ProviderResult）
//! 以及执行查询的 ProviderClient trait。

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use super::progress::ProgressSink;
use super::schema::ProviderSchema;

/// 原始响应：某个数据源返回的 JSON 对象，字段随数据源而异
pub type RawResponse = serde_json::Map<String, serde_json::Value>;

/// 单个数据源的静态描述，启动时构建，之后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSpec {
    /// 唯一名称
    pub name: String,
    /// 决定使用哪张字段映射表
    pub schema: ProviderSchema,
    /// 使用 `{ip}` 作为占位符
    pub url_template: String,
    /// 单次请求超时
    pub timeout: Duration,
}

impl ProviderSpec {
    /// 将目标 IP 代入 URL 模板
    pub fn endpoint(&self, ip: &str) -> String {
        self.url_template.replace("{ip}", ip)
    }
}

/// 单个数据源单次查询的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProviderResult {
    Success { payload: RawResponse },
    Failure { reason: String },
}

impl ProviderResult {
    pub fn success(payload: RawResponse) -> Self {
        ProviderResult::Success { payload }
    }

    pub fn failure<T: Into<String>>(reason: T) -> Self {
        ProviderResult::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProviderResult::Success { .. })
    }

    /// 成功时的原始响应
    pub fn payload(&self) -> Option<&RawResponse> {
        match self {
            ProviderResult::Success { payload } => Some(payload),
            ProviderResult::Failure { .. } => None,
        }
    }

    /// 失败原因
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            ProviderResult::Success { .. } => None,
            ProviderResult::Failure { reason } => Some(reason),
        }
    }
}

/// 数据源查询 trait
///
/// 实现必须把所有网络/解析错误收敛为 `ProviderResult::Failure`，
/// 单个数据源的故障绝不能中断整个查询。
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// 查询单个数据源（`ip` 已由调用方校验）
    async fn query(
        &self,
        provider: &ProviderSpec,
        ip: &str,
        progress: &dyn ProgressSink,
    ) -> ProviderResult;

    /// 获取 client 名称（用于日志）
    fn name(&self) -> &'static str;
}
