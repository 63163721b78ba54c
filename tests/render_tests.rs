//! 终端报告渲染测试

#![cfg(feature = "cli")]

mod common;

use std::net::IpAddr;

use common::success;
use nwo_lookup::interfaces::cli::render::{RawMode, RenderOptions, ReportRenderer};
use nwo_lookup::services::geoip::{
    Aggregator, CanonicalRecord, LookupReport, ProviderOutcome, ProviderResult, ProviderResults,
    ProviderSchema,
};
use serde_json::json;

fn report_for(ip: &str, ip_api: ProviderResult, ipinfo: ProviderResult) -> LookupReport {
    let aggregator = Aggregator::new(vec![
        ("IP-API".to_string(), ProviderSchema::IpApi),
        ("IPInfo".to_string(), ProviderSchema::IpInfo),
    ]);
    let mut results = ProviderResults::new();
    results.insert("IP-API".to_string(), ip_api.clone());
    results.insert("IPInfo".to_string(), ipinfo.clone());
    let record = aggregator.merge(&results);

    let outcomes = vec![
        ProviderOutcome {
            provider: "IP-API".to_string(),
            schema: ProviderSchema::IpApi,
            result: ip_api,
        },
        ProviderOutcome {
            provider: "IPInfo".to_string(),
            schema: ProviderSchema::IpInfo,
            result: ipinfo,
        },
    ];
    LookupReport::new(ip.parse::<IpAddr>().unwrap(), record, outcomes)
}

fn render(report: &LookupReport, options: RenderOptions) -> String {
    let mut renderer = ReportRenderer::new(Vec::new(), options);
    renderer.report(report).unwrap();
    String::from_utf8(renderer.into_inner()).unwrap()
}

fn google() -> LookupReport {
    report_for(
        "8.8.8.8",
        success(json!({
            "status": "success",
            "query": "8.8.8.8",
            "country": "United States",
            "city": "Ashburn",
            "isp": "Google LLC",
            "as": "AS15169 Google LLC",
            "proxy": false
        })),
        ProviderResult::failure("status code = 429"),
    )
}

#[cfg(test)]
mod render_tests {
    use super::*;

    #[test]
    fn test_sections_and_values_rendered() {
        let output = render(&google(), RenderOptions::plain());

        assert!(output.contains("🎯 COMPREHENSIVE IP ANALYSIS REPORT"));
        assert!(output.contains("Target IP: 8.8.8.8"));
        assert!(output.contains("🌍 GEOGRAPHIC LOCATION"));
        assert!(output.contains("City: Ashburn"));
        assert!(output.contains("Country: United States"));
        assert!(output.contains("ISP: Google LLC"));
        assert!(output.contains("AS Number: AS15169"));
        assert!(output.contains("✅ ANALYSIS COMPLETE"));
        // 缺失字段不展示
        assert!(!output.contains("Postal Code:"));
    }

    #[test]
    fn test_flags_default_to_false() {
        let output = render(&google(), RenderOptions::plain());
        assert!(output.contains("🔒 SECURITY ANALYSIS"));
        assert!(output.contains("Is Proxy: false"));
        assert!(output.contains("Is Hosting: false"));
        assert!(output.contains("Is Mobile: false"));
    }

    #[test]
    fn test_failures_listed() {
        let output = render(&google(), RenderOptions::plain());
        assert!(output.contains("⚠️ PROVIDER ERRORS"));
        assert!(output.contains("❌ IPInfo - status code = 429"));
    }

    #[test]
    fn test_empty_record_message() {
        let report = report_for(
            "0.0.0.0",
            ProviderResult::failure("exception: timed out"),
            ProviderResult::failure("status code = 404"),
        );
        let output = render(&report, RenderOptions::plain());

        assert!(output.contains("No data retrieved from APIs"));
        assert!(output.contains("private or reserved"));
        assert!(!output.contains("🌍 GEOGRAPHIC LOCATION"));
        assert!(!output.contains("RAW API RESPONSES"));
    }

    #[test]
    fn test_raw_summary_mode() {
        let output = render(&google(), RenderOptions::plain());
        assert!(output.contains("📊 RAW API RESPONSES (Summary)"));
        assert!(output.contains("--- IP-API ---"));
        assert!(output.contains("  query: 8.8.8.8"));
        assert!(output.contains("  as: AS15169 Google LLC"));
        // 摘要模式不展示表外键
        assert!(!output.contains("proxy"));
    }

    #[test]
    fn test_raw_full_mode() {
        let options = RenderOptions {
            raw_mode: RawMode::Full,
            ..RenderOptions::plain()
        };
        let output = render(&google(), options);
        assert!(output.contains("📊 RAW API RESPONSES"));
        assert!(!output.contains("(Summary)"));
        assert!(output.contains("\"proxy\": false"));
    }

    #[test]
    fn test_rejected_ip_api_payload_shows_message() {
        let report = report_for(
            "10.0.0.1",
            success(json!({"status": "fail", "message": "private range", "query": "10.0.0.1"})),
            ProviderResult::failure("status code = 404"),
        );
        let output = render(&report, RenderOptions::plain());
        assert!(output.contains("No data retrieved from APIs"));
        assert!(output.contains("  status: private range"));
    }

    #[test]
    fn test_plain_output_has_no_ansi_codes() {
        let output = render(&google(), RenderOptions::plain());
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_empty_report_constructible() {
        let report = LookupReport::new(
            "1.1.1.1".parse().unwrap(),
            CanonicalRecord::default(),
            Vec::new(),
        );
        let output = render(&report, RenderOptions::plain());
        assert!(output.contains("Target IP: 1.1.1.1"));
        assert!(!output.contains("PROVIDER ERRORS"));
    }
}
