//! 数据源配置验证
//!
//! 在构建 ProviderSpec 之前检查 providers 列表是否合法。

use std::collections::HashSet;

use super::{LookupConfig, ProviderConfig};
use crate::errors::{LookupError, Result};

/// URL 模板中的 IP 占位符
pub const IP_PLACEHOLDER: &str = "{ip}";

/// 单个 provider 超时上限（秒）
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// 整体截止时间宽限上限（毫秒）
pub const MAX_DEADLINE_GRACE_MS: u64 = 60_000;

/// 验证查询超时配置
///
/// 超时必须在 1..=MAX_TIMEOUT_SECS 之内，宽限不超过 MAX_DEADLINE_GRACE_MS。
pub fn validate_lookup(lookup: &LookupConfig) -> Result<()> {
    if lookup.timeout_secs == 0 {
        return Err(LookupError::config("lookup.timeout_secs must be greater than 0"));
    }
    if lookup.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(LookupError::config(format!(
            "lookup.timeout_secs must not exceed {}, got {}",
            MAX_TIMEOUT_SECS, lookup.timeout_secs
        )));
    }
    if lookup.deadline_grace_ms > MAX_DEADLINE_GRACE_MS {
        return Err(LookupError::config(format!(
            "lookup.deadline_grace_ms must not exceed {}, got {}",
            MAX_DEADLINE_GRACE_MS, lookup.deadline_grace_ms
        )));
    }
    Ok(())
}

/// 验证 providers 列表
///
/// - 名称不能为空，且必须唯一（大小写不敏感）
/// - url_template 必须包含 `{ip}` 占位符，且为 http/https
/// - 超时在 1..=MAX_TIMEOUT_SECS 之内
/// - 至少有一个启用的 provider
pub fn validate_providers(providers: &[ProviderConfig]) -> Result<()> {
    let mut seen = HashSet::new();

    for provider in providers {
        let name = provider.name.trim();
        if name.is_empty() {
            return Err(LookupError::provider_registry("Provider name cannot be empty"));
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(LookupError::provider_registry(format!(
                "Duplicate provider name: '{}'",
                name
            )));
        }
        validate_url_template(&provider.url_template).map_err(|e| {
            LookupError::provider_registry(format!("Provider '{}': {}", name, e))
        })?;
        match provider.timeout_secs {
            Some(0) => {
                return Err(LookupError::provider_registry(format!(
                    "Provider '{}': timeout_secs must be greater than 0",
                    name
                )));
            }
            Some(secs) if secs > MAX_TIMEOUT_SECS => {
                return Err(LookupError::provider_registry(format!(
                    "Provider '{}': timeout_secs must not exceed {}, got {}",
                    name, MAX_TIMEOUT_SECS, secs
                )));
            }
            _ => {}
        }
    }

    if !providers.iter().any(|p| p.enabled) {
        return Err(LookupError::provider_registry("No provider is enabled"));
    }

    Ok(())
}

/// 验证单个 URL 模板
pub fn validate_url_template(template: &str) -> std::result::Result<(), String> {
    if !template.starts_with("http://") && !template.starts_with("https://") {
        return Err(format!(
            "url_template must start with http:// or https://, got '{}'",
            template
        ));
    }
    if !template.contains(IP_PLACEHOLDER) {
        return Err(format!(
            "url_template must contain the {} placeholder",
            IP_PLACEHOLDER
        ));
    }
    Ok(())
}
