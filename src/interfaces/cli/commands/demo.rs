//! Demo mode: analyze a few well-known public resolvers

use std::io;

use super::lookup::{LookupStatus, perform_lookup};
use crate::interfaces::cli::input::LineReader;
use crate::interfaces::cli::render::{ReportRenderer, Tone};
use crate::interfaces::cli::{CliError, OutputOptions};
use crate::services::LookupService;
use crate::system::signal::{self, Interruptible};

pub const DEMO_IPS: &[&str] = &[
    "8.8.8.8",        // Google DNS
    "1.1.1.1",        // Cloudflare DNS
    "208.67.222.222", // OpenDNS
];

/// `nwo-lookup demo`
pub async fn run_demo(
    service: &LookupService,
    options: &OutputOptions,
    no_pause: bool,
) -> Result<(), CliError> {
    let mut out = ReportRenderer::new(io::stdout(), options.render);
    let chatty = !options.json;

    if chatty {
        out.banner()?;
        out.line("🎬 NWO Lookup Tool - DEMO MODE", Tone::Yellow)?;
        out.line(
            "This demo will analyze several well-known IP addresses",
            Tone::Cyan,
        )?;
        out.blank()?;
    }

    let mut stdin = if no_pause || !chatty {
        None
    } else {
        Some(LineReader::stdin()?)
    };
    let total = DEMO_IPS.len();

    for (i, ip) in DEMO_IPS.iter().enumerate() {
        if chatty {
            out.line(
                &format!("🎯 Demo {}/{}: Analyzing {}", i + 1, total, ip),
                Tone::Yellow,
            )?;
            out.blank()?;
        }

        if perform_lookup(service, ip, options).await? == LookupStatus::Interrupted {
            out.line("Demo interrupted", Tone::Yellow)?;
            return Ok(());
        }

        if i + 1 < total
            && let Some(stdin) = stdin.as_mut()
        {
            out.blank()?;
            out.line("Press Enter to continue to next demo...", Tone::Cyan)?;
            match signal::run_until(stdin.next_line(), signal::ctrl_c()).await {
                Interruptible::Completed(line) => {
                    if line?.is_none() {
                        break;
                    }
                }
                Interruptible::Interrupted => {
                    out.blank()?;
                    out.line("Demo interrupted", Tone::Yellow)?;
                    return Ok(());
                }
            }
        }
    }

    if chatty {
        out.blank()?;
        out.line(
            "🎉 Demo completed! You can now use the tool with your own IP addresses.",
            Tone::Green,
        )?;
        out.line("Run 'nwo-lookup' for interactive mode", Tone::Cyan)?;
        out.line("Or 'nwo-lookup <IP>' for single lookup", Tone::Cyan)?;
    }
    Ok(())
}
