//! 合并后的规范化记录
//!
//! 字段集合固定且封闭；缺失一律为 `None`，不会用空字符串占位。

use std::fmt;

use serde::Serialize;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// 规范字段名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum CanonicalField {
    Country,
    Region,
    City,
    Latitude,
    Longitude,
    Timezone,
    PostalCode,
    Continent,
    ContinentCode,
    Isp,
    Organization,
    AsNumber,
    AsName,
    IsProxy,
    IsHosting,
    IsMobile,
    Currency,
    CountryCode,
}

/// 字段值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Coordinate,
    Flag,
}

impl CanonicalField {
    pub fn kind(self) -> FieldKind {
        match self {
            CanonicalField::Latitude | CanonicalField::Longitude => FieldKind::Coordinate,
            CanonicalField::IsProxy | CanonicalField::IsHosting | CanonicalField::IsMobile => {
                FieldKind::Flag
            }
            _ => FieldKind::Text,
        }
    }

    /// 展示用名称
    pub fn label(self) -> &'static str {
        match self {
            CanonicalField::Country => "Country",
            CanonicalField::Region => "Region",
            CanonicalField::City => "City",
            CanonicalField::Latitude => "Latitude",
            CanonicalField::Longitude => "Longitude",
            CanonicalField::Timezone => "Timezone",
            CanonicalField::PostalCode => "Postal Code",
            CanonicalField::Continent => "Continent",
            CanonicalField::ContinentCode => "Continent Code",
            CanonicalField::Isp => "ISP",
            CanonicalField::Organization => "Organization",
            CanonicalField::AsNumber => "AS Number",
            CanonicalField::AsName => "AS Name",
            CanonicalField::IsProxy => "Is Proxy",
            CanonicalField::IsHosting => "Is Hosting",
            CanonicalField::IsMobile => "Is Mobile",
            CanonicalField::Currency => "Currency",
            CanonicalField::CountryCode => "Country Code",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// 字段值
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Coordinate(f64),
    Flag(bool),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Coordinate(_) => FieldKind::Coordinate,
            FieldValue::Flag(_) => FieldKind::Flag,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Coordinate(n) => write!(f, "{}", n),
            FieldValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

/// 合并后的规范化记录
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CanonicalRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continent_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_proxy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hosting: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_mobile: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

impl CanonicalRecord {
    /// 所有字段均缺失（例如全部数据源失败）
    pub fn is_empty(&self) -> bool {
        CanonicalField::iter().all(|f| !self.is_present(f))
    }

    pub fn is_present(&self, field: CanonicalField) -> bool {
        self.get(field).is_some()
    }

    /// 按字段名读取
    pub fn get(&self, field: CanonicalField) -> Option<FieldValue> {
        use CanonicalField as F;
        match field {
            F::Latitude => self.latitude.map(FieldValue::Coordinate),
            F::Longitude => self.longitude.map(FieldValue::Coordinate),
            F::IsProxy => self.is_proxy.map(FieldValue::Flag),
            F::IsHosting => self.is_hosting.map(FieldValue::Flag),
            F::IsMobile => self.is_mobile.map(FieldValue::Flag),
            text => self
                .text_slot(text)
                .and_then(|s| s.clone())
                .map(FieldValue::Text),
        }
    }

    /// 已赋值的字段（按规范顺序）
    pub fn present_fields(&self) -> Vec<(CanonicalField, FieldValue)> {
        CanonicalField::iter()
            .filter_map(|f| self.get(f).map(|v| (f, v)))
            .collect()
    }

    /// 未赋值的标志位按 false 处理
    pub fn proxy(&self) -> bool {
        self.is_proxy.unwrap_or(false)
    }

    pub fn hosting(&self) -> bool {
        self.is_hosting.unwrap_or(false)
    }

    pub fn mobile(&self) -> bool {
        self.is_mobile.unwrap_or(false)
    }

    /// 仅当字段仍缺失时赋值；返回是否写入
    ///
    /// 值类型与字段类型不匹配时不写入。
    pub(crate) fn assign_if_absent(&mut self, field: CanonicalField, value: FieldValue) -> bool {
        if self.is_present(field) || field.kind() != value.kind() {
            return false;
        }
        use CanonicalField as F;
        match (field, value) {
            (F::Latitude, FieldValue::Coordinate(n)) => self.latitude = Some(n),
            (F::Longitude, FieldValue::Coordinate(n)) => self.longitude = Some(n),
            (F::IsProxy, FieldValue::Flag(b)) => self.is_proxy = Some(b),
            (F::IsHosting, FieldValue::Flag(b)) => self.is_hosting = Some(b),
            (F::IsMobile, FieldValue::Flag(b)) => self.is_mobile = Some(b),
            (text, FieldValue::Text(s)) => match self.text_slot_mut(text) {
                Some(slot) => *slot = Some(s),
                None => return false,
            },
            _ => return false,
        }
        true
    }

    fn text_slot(&self, field: CanonicalField) -> Option<&Option<String>> {
        use CanonicalField as F;
        match field {
            F::Country => Some(&self.country),
            F::Region => Some(&self.region),
            F::City => Some(&self.city),
            F::Timezone => Some(&self.timezone),
            F::PostalCode => Some(&self.postal_code),
            F::Continent => Some(&self.continent),
            F::ContinentCode => Some(&self.continent_code),
            F::Isp => Some(&self.isp),
            F::Organization => Some(&self.organization),
            F::AsNumber => Some(&self.as_number),
            F::AsName => Some(&self.as_name),
            F::Currency => Some(&self.currency),
            F::CountryCode => Some(&self.country_code),
            F::Latitude | F::Longitude | F::IsProxy | F::IsHosting | F::IsMobile => None,
        }
    }

    fn text_slot_mut(&mut self, field: CanonicalField) -> Option<&mut Option<String>> {
        use CanonicalField as F;
        match field {
            F::Country => Some(&mut self.country),
            F::Region => Some(&mut self.region),
            F::City => Some(&mut self.city),
            F::Timezone => Some(&mut self.timezone),
            F::PostalCode => Some(&mut self.postal_code),
            F::Continent => Some(&mut self.continent),
            F::ContinentCode => Some(&mut self.continent_code),
            F::Isp => Some(&mut self.isp),
            F::Organization => Some(&mut self.organization),
            F::AsNumber => Some(&mut self.as_number),
            F::AsName => Some(&mut self.as_name),
            F::Currency => Some(&mut self.currency),
            F::CountryCode => Some(&mut self.country_code),
            F::Latitude | F::Longitude | F::IsProxy | F::IsHosting | F::IsMobile => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_empty() {
        let record = CanonicalRecord::default();
        assert!(record.is_empty());
        assert!(record.present_fields().is_empty());
        assert!(!record.proxy());
    }

    #[test]
    fn test_assign_only_when_absent() {
        let mut record = CanonicalRecord::default();
        assert!(record.assign_if_absent(CanonicalField::City, FieldValue::Text("X".into())));
        assert!(!record.assign_if_absent(CanonicalField::City, FieldValue::Text("Y".into())));
        assert_eq!(record.city.as_deref(), Some("X"));
    }

    #[test]
    fn test_explicit_false_counts_as_present() {
        let mut record = CanonicalRecord::default();
        assert!(record.assign_if_absent(CanonicalField::IsProxy, FieldValue::Flag(false)));
        assert!(record.is_present(CanonicalField::IsProxy));
        assert!(!record.assign_if_absent(CanonicalField::IsProxy, FieldValue::Flag(true)));
        assert_eq!(record.is_proxy, Some(false));
    }

    #[test]
    fn test_mismatched_kind_is_rejected() {
        let mut record = CanonicalRecord::default();
        assert!(!record.assign_if_absent(CanonicalField::Latitude, FieldValue::Text("1".into())));
        assert!(!record.assign_if_absent(CanonicalField::City, FieldValue::Flag(true)));
        assert!(record.is_empty());
    }

    #[test]
    fn test_field_names_are_snake_case() {
        assert_eq!(CanonicalField::PostalCode.as_ref(), "postal_code");
        assert_eq!(CanonicalField::AsNumber.to_string(), "as_number");
        assert_eq!(CanonicalField::iter().count(), 18);
    }
}
