use std::fmt;

#[derive(Debug, Clone)]
pub enum LookupError {
    InvalidIp(String),
    Config(String),
    ProviderRegistry(String),
    FileOperation(String),
    Serialization(String),
    Runtime(String),
}

impl LookupError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LookupError::InvalidIp(_) => "E001",
            LookupError::Config(_) => "E002",
            LookupError::ProviderRegistry(_) => "E003",
            LookupError::FileOperation(_) => "E004",
            LookupError::Serialization(_) => "E005",
            LookupError::Runtime(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LookupError::InvalidIp(_) => "Invalid IP Address",
            LookupError::Config(_) => "Configuration Error",
            LookupError::ProviderRegistry(_) => "Provider Registry Error",
            LookupError::FileOperation(_) => "File Operation Error",
            LookupError::Serialization(_) => "Serialization Error",
            LookupError::Runtime(_) => "Runtime Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LookupError::InvalidIp(msg) => msg,
            LookupError::Config(msg) => msg,
            LookupError::ProviderRegistry(msg) => msg,
            LookupError::FileOperation(msg) => msg,
            LookupError::Serialization(msg) => msg,
            LookupError::Runtime(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于日志 / JSON 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LookupError {}

// 便捷的构造函数
impl LookupError {
    pub fn invalid_ip<T: Into<String>>(msg: T) -> Self {
        LookupError::InvalidIp(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        LookupError::Config(msg.into())
    }

    pub fn provider_registry<T: Into<String>>(msg: T) -> Self {
        LookupError::ProviderRegistry(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LookupError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LookupError::Serialization(msg.into())
    }

    pub fn runtime<T: Into<String>>(msg: T) -> Self {
        LookupError::Runtime(msg.into())
    }
}

impl From<std::io::Error> for LookupError {
    fn from(err: std::io::Error) -> Self {
        LookupError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for LookupError {
    fn from(err: toml::ser::Error) -> Self {
        LookupError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for LookupError {
    fn from(err: config::ConfigError) -> Self {
        LookupError::Config(err.to_string())
    }
}

impl From<std::net::AddrParseError> for LookupError {
    fn from(err: std::net::AddrParseError) -> Self {
        LookupError::InvalidIp(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
