//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for nwo-lookup using clap's derive macros.

use clap::{Parser, Subcommand};

/// NWO Lookup - IP intelligence tool
///
/// With an IP argument performs a single lookup; without one enters
/// interactive mode.
#[derive(Parser, Debug)]
#[command(name = "nwo-lookup")]
#[command(version)]
#[command(about = "Advanced IP geolocation & security analysis", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Configuration file path (default: nwo-lookup.toml if present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    /// Log filter override, e.g. "debug" or "nwo_lookup=trace"
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Print full raw JSON responses instead of a summary
    #[arg(long, global = true)]
    pub raw: bool,

    /// Print the report as JSON (no colors, no banner)
    #[arg(long, global = true, conflicts_with = "raw")]
    pub json: bool,

    /// IP address to look up (IPv4 or IPv6)
    pub ip: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a few well-known public resolvers
    Demo {
        /// Don't wait for Enter between lookups
        #[arg(long)]
        no_pause: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: nwo-lookup.example.toml)
        output_path: Option<String>,

        /// Overwrite existing file without asking
        #[arg(long)]
        force: bool,
    },
}
