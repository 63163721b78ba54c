use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::services::geoip::{ProviderSchema, ProviderSpec};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "nwo-lookup.toml";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含：
/// - lookup: 超时与整体截止时间
/// - providers: 按优先级排列的数据源列表
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticConfig {
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            lookup: LookupConfig::default(),
            providers: default_providers(),
            logging: LoggingConfig::default(),
        }
    }
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > TOML 文件 > 默认值
    /// ENV 前缀：NWO，分隔符：__
    /// 示例：NWO__LOOKUP__TIMEOUT_SECS=5
    ///
    /// 显式指定的文件必须存在；默认路径的文件可选。
    pub fn load(path: Option<&str>) -> Result<Self> {
        use config::{Config, Environment, File};

        let (path, required) = match path {
            Some(p) => (p, true),
            None => (DEFAULT_CONFIG_PATH, false),
        };

        let settings = Config::builder()
            .add_source(File::with_name(path).required(required))
            .add_source(
                Environment::with_prefix("NWO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: StaticConfig = settings.try_deserialize()?;
        if std::path::Path::new(path).exists() {
            tracing::debug!("Configuration loaded from: {}", path);
        }
        Ok(config)
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> Result<String> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// 按配置顺序构建启用的 ProviderSpec 列表（即合并优先级）
    pub fn provider_specs(&self) -> Result<Vec<ProviderSpec>> {
        super::validators::validate_lookup(&self.lookup)?;
        super::validators::validate_providers(&self.providers)?;

        Ok(self
            .providers
            .iter()
            .filter(|p| p.enabled)
            .map(|p| ProviderSpec {
                name: p.name.clone(),
                schema: p.schema,
                url_template: p.url_template.clone(),
                timeout: Duration::from_secs(p.timeout_secs.unwrap_or(self.lookup.timeout_secs)),
            })
            .collect())
    }

    /// 单次查询的整体截止时间：最慢 provider 的超时 + 宽限
    pub fn lookup_deadline(&self, specs: &[ProviderSpec]) -> Duration {
        let slowest = specs
            .iter()
            .map(|s| s.timeout)
            .max()
            .unwrap_or(Duration::from_secs(self.lookup.timeout_secs));
        slowest + Duration::from_millis(self.lookup.deadline_grace_ms)
    }
}

/// 查询配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// 单个 provider 的 HTTP 超时（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// 整体截止时间在最慢超时之上的宽限（毫秒）
    #[serde(default = "default_deadline_grace_ms")]
    pub deadline_grace_ms: u64,
}

/// 单个数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub name: String,
    pub schema: ProviderSchema,
    /// 使用 `{ip}` 作为占位符
    pub url_template: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// 覆盖 lookup.timeout_secs
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

pub const IP_API_URL_TEMPLATE: &str = "http://ip-api.com/json/{ip}?fields=status,message,continent,continentCode,country,countryCode,region,regionName,city,district,zip,lat,lon,timezone,offset,currency,isp,org,as,asname,mobile,proxy,hosting,query";

pub const IPINFO_URL_TEMPLATE: &str = "https://ipinfo.io/{ip}/json";

fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig {
            name: "IP-API".to_string(),
            schema: ProviderSchema::IpApi,
            url_template: IP_API_URL_TEMPLATE.to_string(),
            enabled: true,
            timeout_secs: None,
        },
        ProviderConfig {
            name: "IPInfo".to_string(),
            schema: ProviderSchema::IpInfo,
            url_template: IPINFO_URL_TEMPLATE.to_string(),
            enabled: true,
            timeout_secs: None,
        },
    ]
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_deadline_grace_ms() -> u64 {
    500
}

fn default_enabled() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            deadline_grace_ms: default_deadline_grace_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LookupError;

    #[test]
    fn test_default_providers_in_priority_order() {
        let config = StaticConfig::default();
        let specs = config.provider_specs().unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].name, "IP-API");
        assert_eq!(specs[0].schema, ProviderSchema::IpApi);
        assert_eq!(specs[1].name, "IPInfo");
        assert_eq!(specs[1].timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_disabled_provider_skipped() {
        let mut config = StaticConfig::default();
        config.providers[0].enabled = false;
        let specs = config.provider_specs().unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "IPInfo");
    }

    #[test]
    fn test_per_provider_timeout_override() {
        let mut config = StaticConfig::default();
        config.providers[1].timeout_secs = Some(3);
        let specs = config.provider_specs().unwrap();
        assert_eq!(specs[0].timeout, Duration::from_secs(10));
        assert_eq!(specs[1].timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_lookup_deadline_uses_slowest_provider() {
        let mut config = StaticConfig::default();
        config.providers[0].timeout_secs = Some(2);
        config.providers[1].timeout_secs = Some(7);
        let specs = config.provider_specs().unwrap();
        assert_eq!(
            config.lookup_deadline(&specs),
            Duration::from_secs(7) + Duration::from_millis(500)
        );
    }

    #[test]
    fn test_zero_default_timeout_rejected() {
        let mut config = StaticConfig::default();
        config.lookup.timeout_secs = 0;
        assert!(matches!(
            config.provider_specs(),
            Err(LookupError::Config(_))
        ));
    }

    #[test]
    fn test_sample_config_round_trips_through_toml() {
        let sample = StaticConfig::generate_sample_config().unwrap();
        assert!(sample.contains("ip-api.com"));
        let parsed: StaticConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.providers.len(), 2);
        assert_eq!(parsed.lookup.timeout_secs, 10);
    }
}
