use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use nwo_lookup::cli::Cli;
use nwo_lookup::config::init_config;
use nwo_lookup::interfaces::cli::run_cli_command;
use nwo_lookup::system::logging::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match init_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            return ExitCode::FAILURE;
        }
    };

    // 日志 guard 必须存活到进程结束
    let _guard = match init_logging(&config.logging, cli.log_level.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            return ExitCode::FAILURE;
        }
    };
    debug!("Starting with {} configured providers", config.providers.len());

    match run_cli_command(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            ExitCode::FAILURE
        }
    }
}
