//! 终端报告渲染
//!
//! 只读消费 `LookupReport`：规范记录、各数据源原始响应、失败原因。

use std::io::{self, Write};

use chrono::Local;
use colored::Colorize;

use crate::services::geoip::{
    CanonicalField, FieldValue, LookupEvent, LookupReport, ProgressSink, ProviderOutcome,
    RawResponse,
};
use crate::utils::ip::is_non_public;

const SEPARATOR_WIDTH: usize = 80;

const GEO_FIELDS: &[CanonicalField] = &[
    CanonicalField::Country,
    CanonicalField::Region,
    CanonicalField::City,
    CanonicalField::Latitude,
    CanonicalField::Longitude,
    CanonicalField::Timezone,
    CanonicalField::PostalCode,
    CanonicalField::Continent,
];

const NETWORK_FIELDS: &[CanonicalField] = &[
    CanonicalField::Isp,
    CanonicalField::Organization,
    CanonicalField::AsNumber,
    CanonicalField::AsName,
];

const SECURITY_FIELDS: &[CanonicalField] = &[
    CanonicalField::IsProxy,
    CanonicalField::IsHosting,
    CanonicalField::IsMobile,
];

const ADDITIONAL_FIELDS: &[CanonicalField] = &[
    CanonicalField::Currency,
    CanonicalField::CountryCode,
    CanonicalField::ContinentCode,
];

/// 行颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Green,
    Red,
    Yellow,
    Cyan,
    White,
    Gray,
}

/// 原始响应展示方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawMode {
    /// 每个数据源只展示关键字段
    #[default]
    Summary,
    /// 完整的格式化 JSON
    Full,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub color: bool,
    pub timestamps: bool,
    pub raw_mode: RawMode,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: true,
            timestamps: true,
            raw_mode: RawMode::Summary,
        }
    }
}

impl RenderOptions {
    /// 无颜色、无时间戳，输出稳定（测试 / 管道）
    pub fn plain() -> Self {
        Self {
            color: false,
            timestamps: false,
            raw_mode: RawMode::Summary,
        }
    }
}

/// 格式化一行输出：`[HH:MM:SS] message`
pub fn format_line(options: &RenderOptions, message: &str, tone: Tone) -> String {
    let text = if options.timestamps {
        format!("[{}] {}", Local::now().format("%H:%M:%S"), message)
    } else {
        message.to_string()
    };
    paint(options, &text, tone)
}

fn paint(options: &RenderOptions, text: &str, tone: Tone) -> String {
    if !options.color {
        return text.to_string();
    }
    match tone {
        Tone::Green => text.green().bold().to_string(),
        Tone::Red => text.red().bold().to_string(),
        Tone::Yellow => text.yellow().bold().to_string(),
        Tone::Cyan => text.cyan().bold().to_string(),
        Tone::White => text.white().to_string(),
        Tone::Gray => text.dimmed().to_string(),
    }
}

pub struct ReportRenderer<W: Write> {
    out: W,
    options: RenderOptions,
}

impl<W: Write> ReportRenderer<W> {
    pub fn new(out: W, options: RenderOptions) -> Self {
        Self { out, options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn line(&mut self, message: &str, tone: Tone) -> io::Result<()> {
        writeln!(self.out, "{}", format_line(&self.options, message, tone))
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn separator(&mut self) -> io::Result<()> {
        let line = "═".repeat(SEPARATOR_WIDTH);
        writeln!(self.out, "{}", paint(&self.options, &line, Tone::White))
    }

    pub fn banner(&mut self) -> io::Result<()> {
        let banner = [
            "╔══════════════════════════════════════════════════════════════════════════════╗",
            "║                          ⚡ NWO LOOKUP - IP Intelligence Tool ⚡             ║",
            "║                         Advanced IP Geolocation & Security Analysis          ║",
            "╚══════════════════════════════════════════════════════════════════════════════╝",
        ];
        self.blank()?;
        for row in banner {
            writeln!(self.out, "{}", paint(&self.options, row, Tone::Cyan))?;
        }
        self.blank()
    }

    /// 渲染完整报告
    pub fn report(&mut self, report: &LookupReport) -> io::Result<()> {
        let ip = report.ip();

        self.blank()?;
        self.separator()?;
        self.line("🎯 COMPREHENSIVE IP ANALYSIS REPORT", Tone::Cyan)?;
        self.separator()?;

        self.line("📍 BASIC INFORMATION", Tone::Yellow)?;
        self.line(&format!("Target IP: {}", ip), Tone::White)?;
        if is_non_public(&ip) {
            self.line(
                "Note: private or reserved address, providers usually have no data for it",
                Tone::Gray,
            )?;
        }

        let record = report.record();
        if record.is_empty() {
            self.line("❌ No data retrieved from APIs", Tone::Red)?;
        } else {
            self.section(report, "🌍 GEOGRAPHIC LOCATION", GEO_FIELDS)?;
            self.section(report, "🏢 ISP & NETWORK INFORMATION", NETWORK_FIELDS)?;
            self.security_section(report)?;
            self.section(report, "💰 ADDITIONAL INFORMATION", ADDITIONAL_FIELDS)?;
        }

        self.failures(report)?;
        self.raw_payloads(report)?;

        self.blank()?;
        self.separator()?;
        self.line("✅ ANALYSIS COMPLETE", Tone::Green)?;
        self.separator()
    }

    fn section(
        &mut self,
        report: &LookupReport,
        title: &str,
        fields: &[CanonicalField],
    ) -> io::Result<()> {
        self.blank()?;
        self.line(title, Tone::Yellow)?;
        for &field in fields {
            if let Some(value) = report.record().get(field) {
                self.line(&format!("{}: {}", field.label(), value), Tone::White)?;
            }
        }
        Ok(())
    }

    /// 标志位总是展示；未赋值按 false 处理
    fn security_section(&mut self, report: &LookupReport) -> io::Result<()> {
        self.blank()?;
        self.line("🔒 SECURITY ANALYSIS", Tone::Yellow)?;
        for &field in SECURITY_FIELDS {
            let flagged = matches!(report.record().get(field), Some(FieldValue::Flag(true)));
            let tone = if flagged { Tone::Red } else { Tone::Green };
            self.line(&format!("{}: {}", field.label(), flagged), tone)?;
        }
        Ok(())
    }

    fn failures(&mut self, report: &LookupReport) -> io::Result<()> {
        let failures: Vec<(&str, &str)> = report.failures().collect();
        if failures.is_empty() {
            return Ok(());
        }
        self.blank()?;
        self.line("⚠️ PROVIDER ERRORS", Tone::Yellow)?;
        for (provider, reason) in failures {
            self.line(&format!("❌ {} - {}", provider, reason), Tone::Red)?;
        }
        Ok(())
    }

    fn raw_payloads(&mut self, report: &LookupReport) -> io::Result<()> {
        let payloads: Vec<(&ProviderOutcome, &RawResponse)> = report.raw_payloads().collect();
        if payloads.is_empty() {
            return Ok(());
        }

        self.blank()?;
        match self.options.raw_mode {
            RawMode::Summary => self.line("📊 RAW API RESPONSES (Summary)", Tone::Yellow)?,
            RawMode::Full => self.line("📊 RAW API RESPONSES", Tone::Yellow)?,
        }

        for (outcome, payload) in payloads {
            self.blank()?;
            self.line(&format!("--- {} ---", outcome.provider), Tone::Cyan)?;
            match self.options.raw_mode {
                RawMode::Summary => {
                    if !outcome.schema.accepts(payload) {
                        let message = payload
                            .get("message")
                            .and_then(|m| m.as_str())
                            .unwrap_or("lookup rejected");
                        self.line(&format!("  status: {}", message), Tone::Red)?;
                        continue;
                    }
                    for key in outcome.schema.summary_keys() {
                        if let Some(value) = payload.get(*key) {
                            self.line(&format!("  {}: {}", key, display_json(value)), Tone::White)?;
                        }
                    }
                }
                RawMode::Full => {
                    let pretty = serde_json::to_string_pretty(payload)
                        .unwrap_or_else(|e| format!("<unprintable: {}>", e));
                    for row in pretty.lines() {
                        self.line(row, Tone::Gray)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// 字符串不带引号，其它值按 JSON 输出
fn display_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 把查询进度事件打印到 stdout
#[derive(Debug, Clone, Copy)]
pub struct TerminalProgress {
    options: RenderOptions,
}

impl TerminalProgress {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl ProgressSink for TerminalProgress {
    fn notify(&self, event: &LookupEvent) {
        let (message, tone) = match event {
            LookupEvent::Querying { provider } => {
                (format!("📡 Querying {} API...", provider), Tone::Yellow)
            }
            LookupEvent::Succeeded { provider } => (format!("✅ {} - Success", provider), Tone::Green),
            LookupEvent::Failed { provider, reason } => {
                (format!("❌ {} - {}", provider, reason), Tone::Red)
            }
        };
        println!("{}", format_line(&self.options, &message, tone));
    }
}
