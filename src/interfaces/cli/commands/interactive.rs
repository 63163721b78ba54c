//! Interactive mode: read IPs from stdin until `quit`

use std::io::{self, Write};

use colored::Colorize;

use super::lookup::{LookupStatus, perform_lookup};
use crate::interfaces::cli::input::LineReader;
use crate::interfaces::cli::render::{ReportRenderer, Tone};
use crate::interfaces::cli::{CliError, OutputOptions};
use crate::services::LookupService;
use crate::system::signal::{self, Interruptible};

/// Words that leave interactive mode (case-insensitive)
const EXIT_KEYWORDS: &[&str] = &["quit", "exit", "q"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveInput {
    Quit,
    Empty,
    Candidate(String),
}

/// Classify one line typed at the prompt
pub fn classify_input(line: &str) -> InteractiveInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        InteractiveInput::Empty
    } else if EXIT_KEYWORDS
        .iter()
        .any(|k| trimmed.eq_ignore_ascii_case(k))
    {
        InteractiveInput::Quit
    } else {
        InteractiveInput::Candidate(trimmed.to_string())
    }
}

/// `nwo-lookup` with no arguments
pub async fn interactive(service: &LookupService, options: &OutputOptions) -> Result<(), CliError> {
    let mut out = ReportRenderer::new(io::stdout(), options.render);
    if !options.json {
        out.banner()?;
        out.line("Welcome to NWO Lookup - IP Intelligence Tool", Tone::Green)?;
        out.line("Enter 'quit' or 'exit' to terminate the application", Tone::Cyan)?;
        out.blank()?;
    }

    let mut lines = LineReader::stdin()?;

    loop {
        let prompt = "Enter IP address to lookup: ";
        if options.render.color {
            print!("{}", prompt.yellow().bold());
        } else {
            print!("{}", prompt);
        }
        io::stdout().flush()?;

        let line = match signal::run_until(lines.next_line(), signal::ctrl_c()).await {
            Interruptible::Completed(Ok(Some(line))) => line,
            // EOF
            Interruptible::Completed(Ok(None)) => {
                out.blank()?;
                break;
            }
            Interruptible::Completed(Err(e)) => return Err(e.into()),
            Interruptible::Interrupted => {
                out.blank()?;
                out.line("Application terminated by user", Tone::Yellow)?;
                break;
            }
        };

        let candidate = match classify_input(&line) {
            InteractiveInput::Quit => {
                out.line("Goodbye! 👋", Tone::Cyan)?;
                break;
            }
            InteractiveInput::Empty => {
                out.line("Please enter a valid IP address", Tone::Red)?;
                continue;
            }
            InteractiveInput::Candidate(candidate) => candidate,
        };

        out.blank()?;
        match perform_lookup(service, &candidate, options).await {
            Ok(LookupStatus::Done) => {
                out.blank()?;
                out.line(
                    "Lookup completed. Enter another IP or 'quit' to exit.",
                    Tone::Green,
                )?;
                out.blank()?;
            }
            Ok(LookupStatus::Interrupted) => {
                out.blank()?;
                out.line("Application terminated by user", Tone::Yellow)?;
                break;
            }
            Err(CliError::InvalidInput(msg)) => {
                out.line(&format!("Invalid IP address format ({})", msg), Tone::Red)?;
            }
            Err(e) => {
                out.line(&format!("An error occurred: {}", e), Tone::Red)?;
            }
        }
    }

    Ok(())
}
