//! 多数据源合并
//!
//! 按固定优先级对成功的响应做单次折叠：高优先级数据源先按映射表写入全部能提供的字段，
//! 后续数据源只填补仍缺失的字段。纯函数，无 I/O。

use std::collections::HashMap;

use tracing::{debug, trace};

use super::provider::{ProviderResult, ProviderSpec, RawResponse};
use super::record::CanonicalRecord;
use super::schema::ProviderSchema;

/// 数据源名称 -> 查询结果
pub type ProviderResults = HashMap<String, ProviderResult>;

#[derive(Debug, Clone)]
pub struct Aggregator {
    /// 合并优先级（高 -> 低）
    order: Vec<(String, ProviderSchema)>,
}

impl Aggregator {
    pub fn new(order: Vec<(String, ProviderSchema)>) -> Self {
        Self { order }
    }

    /// 按 specs 的顺序作为优先级
    pub fn from_specs(specs: &[ProviderSpec]) -> Self {
        Self::new(
            specs
                .iter()
                .map(|s| (s.name.clone(), s.schema))
                .collect(),
        )
    }

    pub fn priority(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|(name, _)| name.as_str())
    }

    /// 合并所有成功结果为一条规范记录
    ///
    /// - 失败结果不会被读取
    /// - 不在优先级列表中的数据源被忽略
    /// - 已有值（包括 `false`）的字段不会被低优先级数据源覆盖
    pub fn merge(&self, results: &ProviderResults) -> CanonicalRecord {
        self.order
            .iter()
            .filter_map(|(name, schema)| {
                let payload = results.get(name)?.payload()?;
                if !schema.accepts(payload) {
                    debug!("{} payload rejected by {:?} schema, skipping", name, schema);
                    return None;
                }
                Some((name.as_str(), *schema, payload))
            })
            .fold(CanonicalRecord::default(), |mut record, (name, schema, payload)| {
                apply(&mut record, name, schema, payload);
                record
            })
    }
}

fn apply(record: &mut CanonicalRecord, name: &str, schema: ProviderSchema, payload: &RawResponse) {
    for rule in schema.field_table() {
        if record.is_present(rule.target) {
            continue;
        }
        if let Some(value) = rule.extract(payload)
            && record.assign_if_absent(rule.target, value)
        {
            trace!("{} <- {}.{}", rule.target, name, rule.raw_key);
        }
    }
}
