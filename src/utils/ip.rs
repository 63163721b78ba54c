//! IP 地址处理工具
//!
//! - 严格的 IP 字面量校验（查询前的唯一入口）
//! - 私有 / 保留地址检测（数据源通常对这类地址没有数据）

use std::net::IpAddr;

use crate::errors::{LookupError, Result};

/// 解析 IPv4 / IPv6 字面量
///
/// 只去掉首尾空白；不接受主机名、端口或 CIDR。
pub fn parse_ip_literal(input: &str) -> Result<IpAddr> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LookupError::invalid_ip("Please enter an IP address"));
    }
    trimmed
        .parse::<IpAddr>()
        .map_err(|_| LookupError::invalid_ip(format!("Invalid IP address format: '{}'", trimmed)))
}

/// 检查 IP 是否为私有地址或 localhost
pub fn is_private_or_local(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback() || v4.is_link_local(),
        IpAddr::V6(v6) => {
            // IPv6 私有地址：
            // - fc00::/7 (ULA, RFC 4193): fc00::/8 + fd00::/8
            // - fe80::/10 (Link-local)
            // - ::1 (Loopback)
            v6.is_loopback()
                || (v6.segments()[0] & 0xfe00) == 0xfc00 // fc00::/7
                || (v6.segments()[0] & 0xffc0) == 0xfe80 // fe80::/10
        }
    }
}

/// 不可公网路由的地址：私有、本地、未指定、组播、文档/广播保留段
pub fn is_non_public(ip: &IpAddr) -> bool {
    if is_private_or_local(ip) || ip.is_unspecified() || ip.is_multicast() {
        return true;
    }
    match ip {
        IpAddr::V4(v4) => v4.is_broadcast() || v4.is_documentation(),
        // 2001:db8::/32 文档段
        IpAddr::V6(v6) => v6.segments()[0] == 0x2001 && v6.segments()[1] == 0x0db8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_literals() {
        assert_eq!(
            parse_ip_literal("8.8.8.8").unwrap(),
            "8.8.8.8".parse::<IpAddr>().unwrap()
        );
        assert!(parse_ip_literal("  1.1.1.1\n").is_ok());
        assert!(parse_ip_literal("2001:4860:4860::8888").is_ok());
        assert!(parse_ip_literal("::1").is_ok());
        assert!(parse_ip_literal("0.0.0.0").is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in [
            "999.999.999.999",
            "8.8.8",
            "8.8.8.8.8",
            "google.com",
            "8.8.8.8:53",
            "10.0.0.0/8",
            "2001:db8::g",
        ] {
            let err = parse_ip_literal(input).unwrap_err();
            assert!(matches!(err, LookupError::InvalidIp(_)), "{input}");
        }
    }

    #[test]
    fn test_parse_rejects_empty() {
        let err = parse_ip_literal("   ").unwrap_err();
        assert!(err.message().contains("enter an IP"));
    }

    #[test]
    fn test_private_detection() {
        let private: IpAddr = "192.168.1.1".parse().unwrap();
        let public: IpAddr = "8.8.8.8".parse().unwrap();
        let ula: IpAddr = "fd12:3456::1".parse().unwrap();
        assert!(is_private_or_local(&private));
        assert!(is_private_or_local(&ula));
        assert!(!is_private_or_local(&public));
    }

    #[test]
    fn test_non_public_detection() {
        for ip in ["0.0.0.0", "255.255.255.255", "192.0.2.1", "224.0.0.1", "2001:db8::1", "::"] {
            let ip: IpAddr = ip.parse().unwrap();
            assert!(is_non_public(&ip), "{ip}");
        }
        let public: IpAddr = "1.1.1.1".parse().unwrap();
        assert!(!is_non_public(&public));
    }
}
