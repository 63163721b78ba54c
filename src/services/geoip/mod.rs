//! IP 地理位置查询服务模块
//!
//! 并发查询多个外部 API，容忍任意子集失败，并按固定优先级合并为一条规范记录：
//! - `provider`: 数据源描述与 client trait
//! - `external_api`: 基于 ureq 的 HTTP 实现
//! - `schema`: 各数据源的静态字段映射表
//! - `aggregator`: 优先级合并
//! - `lookup`: 校验、并发查询、截止时间、汇总报告

mod aggregator;
mod external_api;
mod lookup;
mod progress;
mod provider;
mod record;
mod schema;

pub use aggregator::{Aggregator, ProviderResults};
pub use external_api::HttpProviderClient;
pub use lookup::{DEADLINE_EXCEEDED, LookupReport, LookupService, ProviderOutcome};
pub use progress::{LookupEvent, NoopProgress, ProgressSink, RecordingProgress, TracingProgress};
pub use provider::{ProviderClient, ProviderResult, ProviderSpec, RawResponse};
pub use record::{CanonicalField, CanonicalRecord, FieldKind, FieldValue};
pub use schema::{FieldRule, ProviderSchema, Transform};
