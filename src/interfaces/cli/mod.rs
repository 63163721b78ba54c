//! CLI interface module
//!
//! This module provides the terminal presenter for lookup reports:
//! single lookup, interactive loop, demo mode and config generation.

pub mod commands;
pub mod input;
pub mod render;

use std::fmt;
use std::sync::Arc;

use crate::cli::{Cli, Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::LookupError;
use crate::services::LookupService;
use render::{RawMode, RenderOptions};

#[derive(Debug)]
pub enum CliError {
    InvalidInput(String),
    ConfigError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::InvalidInput(msg) => format!("Invalid input: {}", msg),
            CliError::ConfigError(msg) => format!("Config error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::InvalidInput(msg) => {
                format!("{} {}", "Invalid input:".yellow().bold(), msg.white())
            }
            CliError::ConfigError(msg) => {
                format!("{} {}", "Config error:".red().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<LookupError> for CliError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::InvalidIp(msg) => CliError::InvalidInput(msg),
            LookupError::Config(_) | LookupError::ProviderRegistry(_) => {
                CliError::ConfigError(err.to_string())
            }
            other => CliError::CommandError(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::CommandError(format!("I/O error: {}", err))
    }
}

/// Output settings shared by lookup-style commands
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Print reports as JSON instead of colored text
    pub json: bool,
    pub render: RenderOptions,
}

impl OutputOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json: cli.json,
            render: RenderOptions {
                raw_mode: if cli.raw { RawMode::Full } else { RawMode::Summary },
                ..RenderOptions::default()
            },
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cli: Cli, config: Arc<StaticConfig>) -> Result<(), CliError> {
    let options = OutputOptions::from_cli(&cli);

    match cli.command {
        // Generate doesn't need providers, handle it before building the service
        Some(Commands::Config { action }) => match action {
            ConfigCommands::Generate { output_path, force } => {
                commands::config_generate(output_path, force)
            }
        },
        Some(Commands::Demo { no_pause }) => {
            let service = LookupService::from_config(&config)?;
            commands::run_demo(&service, &options, no_pause).await
        }
        None => {
            let service = LookupService::from_config(&config)?;
            match cli.ip {
                Some(ip) => commands::single_lookup(&service, &ip, &options).await,
                None => commands::interactive(&service, &options).await,
            }
        }
    }
}
