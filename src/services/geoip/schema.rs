//! 各数据源的静态字段映射表
//!
//! 每个 schema 把原始 JSON 键映射到规范字段；表外的键只保留在原始响应中。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::provider::RawResponse;
use super::record::{CanonicalField, FieldValue};

/// 数据源响应格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderSchema {
    /// ip-api.com
    #[serde(rename = "ip-api", alias = "ipapi", alias = "IpApi")]
    IpApi,
    /// ipinfo.io
    #[serde(rename = "ipinfo", alias = "IpInfo")]
    IpInfo,
}

/// 原始值到规范值的转换方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// 非空字符串
    Text,
    /// JSON 数字
    Coordinate,
    /// JSON 布尔值（只认显式的 true/false）
    Flag,
    /// 组合字符串的首个空白分隔 token，如 "AS15169 Google LLC" -> "AS15169"
    FirstToken,
    /// "lat,lon" 字符串中的第 N 部分
    PairPart(usize),
}

/// 单条映射规则
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub raw_key: &'static str,
    pub target: CanonicalField,
    pub transform: Transform,
}

const fn rule(raw_key: &'static str, target: CanonicalField, transform: Transform) -> FieldRule {
    FieldRule {
        raw_key,
        target,
        transform,
    }
}

const IP_API_TABLE: &[FieldRule] = &[
    rule("country", CanonicalField::Country, Transform::Text),
    rule("countryCode", CanonicalField::CountryCode, Transform::Text),
    rule("regionName", CanonicalField::Region, Transform::Text),
    rule("city", CanonicalField::City, Transform::Text),
    rule("lat", CanonicalField::Latitude, Transform::Coordinate),
    rule("lon", CanonicalField::Longitude, Transform::Coordinate),
    rule("timezone", CanonicalField::Timezone, Transform::Text),
    rule("zip", CanonicalField::PostalCode, Transform::Text),
    rule("continent", CanonicalField::Continent, Transform::Text),
    rule("continentCode", CanonicalField::ContinentCode, Transform::Text),
    rule("isp", CanonicalField::Isp, Transform::Text),
    rule("org", CanonicalField::Organization, Transform::Text),
    rule("as", CanonicalField::AsNumber, Transform::FirstToken),
    rule("asname", CanonicalField::AsName, Transform::Text),
    rule("proxy", CanonicalField::IsProxy, Transform::Flag),
    rule("hosting", CanonicalField::IsHosting, Transform::Flag),
    rule("mobile", CanonicalField::IsMobile, Transform::Flag),
    rule("currency", CanonicalField::Currency, Transform::Text),
];

const IPINFO_TABLE: &[FieldRule] = &[
    rule("country", CanonicalField::Country, Transform::Text),
    rule("region", CanonicalField::Region, Transform::Text),
    rule("city", CanonicalField::City, Transform::Text),
    rule("postal", CanonicalField::PostalCode, Transform::Text),
    rule("org", CanonicalField::Organization, Transform::Text),
    rule("timezone", CanonicalField::Timezone, Transform::Text),
    rule("loc", CanonicalField::Latitude, Transform::PairPart(0)),
    rule("loc", CanonicalField::Longitude, Transform::PairPart(1)),
];

impl ProviderSchema {
    /// 字段映射表
    pub fn field_table(self) -> &'static [FieldRule] {
        match self {
            ProviderSchema::IpApi => IP_API_TABLE,
            ProviderSchema::IpInfo => IPINFO_TABLE,
        }
    }

    /// 响应是否可参与合并
    ///
    /// ip-api.com 查询失败时仍返回 200，以 `"status": "fail"` 表示。
    pub fn accepts(self, raw: &RawResponse) -> bool {
        match self {
            ProviderSchema::IpApi => raw.get("status").and_then(Value::as_str) == Some("success"),
            ProviderSchema::IpInfo => true,
        }
    }

    /// 原始响应摘要中展示的键
    pub fn summary_keys(self) -> &'static [&'static str] {
        match self {
            ProviderSchema::IpApi => &["query", "country", "regionName", "city", "isp", "org", "as"],
            ProviderSchema::IpInfo => &["ip", "city", "region", "country", "org", "postal"],
        }
    }
}

impl FieldRule {
    /// 从原始响应中取出该规则对应的规范值
    ///
    /// 键缺失、类型不符、空字符串都视为缺失。
    pub fn extract(&self, raw: &RawResponse) -> Option<FieldValue> {
        let value = raw.get(self.raw_key)?;
        match self.transform {
            Transform::Text => non_empty(value).map(|s| FieldValue::Text(s.to_string())),
            Transform::Coordinate => value
                .as_f64()
                .filter(|n| n.is_finite())
                .map(FieldValue::Coordinate),
            Transform::Flag => value.as_bool().map(FieldValue::Flag),
            Transform::FirstToken => non_empty(value)
                .and_then(|s| s.split_whitespace().next())
                .map(|token| FieldValue::Text(token.to_string())),
            Transform::PairPart(index) => non_empty(value)
                .and_then(|s| s.split(',').nth(index))
                .and_then(|part| part.trim().parse::<f64>().ok())
                .filter(|n| n.is_finite())
                .map(FieldValue::Coordinate),
        }
    }
}

fn non_empty(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}
