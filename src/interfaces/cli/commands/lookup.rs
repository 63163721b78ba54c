//! Single lookup command

use std::io;
use std::sync::Arc;

use crate::interfaces::cli::render::{ReportRenderer, TerminalProgress, Tone, format_line};
use crate::interfaces::cli::{CliError, OutputOptions};
use crate::services::LookupService;
use crate::services::geoip::{NoopProgress, ProgressSink};
use crate::system::signal::{self, Interruptible};
use crate::utils::ip::parse_ip_literal;

/// How a lookup ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStatus {
    Done,
    /// Ctrl+C arrived before all providers finished
    Interrupted,
}

/// Look up one IP and print the report
///
/// The IP is validated before anything is printed or queried.
pub async fn perform_lookup(
    service: &LookupService,
    input: &str,
    options: &OutputOptions,
) -> Result<LookupStatus, CliError> {
    let ip = parse_ip_literal(input)?;

    let progress: Arc<dyn ProgressSink> = if options.json {
        Arc::new(NoopProgress)
    } else {
        println!(
            "{}",
            format_line(&options.render, &format!("🎯 Starting lookup for IP: {}", ip), Tone::Cyan)
        );
        Arc::new(TerminalProgress::new(options.render))
    };

    let ip_text = ip.to_string();
    let lookup = service.lookup(&ip_text, progress);
    let report = match signal::run_until(lookup, signal::ctrl_c()).await {
        Interruptible::Completed(result) => result?,
        Interruptible::Interrupted => return Ok(LookupStatus::Interrupted),
    };

    if options.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::CommandError(format!("Failed to serialize report: {}", e)))?;
        println!("{}", json);
    } else {
        let mut renderer = ReportRenderer::new(io::stdout().lock(), options.render);
        renderer.report(&report)?;
    }

    Ok(LookupStatus::Done)
}

/// `nwo-lookup <IP>`
pub async fn single_lookup(
    service: &LookupService,
    input: &str,
    options: &OutputOptions,
) -> Result<(), CliError> {
    if !options.json {
        ReportRenderer::new(io::stdout().lock(), options.render).banner()?;
    }

    match perform_lookup(service, input, options).await? {
        LookupStatus::Done => Ok(()),
        LookupStatus::Interrupted => {
            println!(
                "{}",
                format_line(&options.render, "Application terminated by user", Tone::Yellow)
            );
            Ok(())
        }
    }
}
