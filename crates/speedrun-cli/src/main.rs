//! Speedrun CLI - Main entry point

use clap::Parser;
use speedrun_cli::config::Config;
use speedrun_cli::{Cli, Commands};
use speedrun_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_config = LogConfig::builder()
        .level(if cli.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Info
        })
        .output(LogOutput::Console)
        .log_file_prefix("speedrun-cli")
        .build();

    // Environment variables take precedence over the flags
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging
    let guard = init_logging(&log_config).ok();

    if let Err(e) = execute_command(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        drop(guard);
        process::exit(1);
    }
}

async fn execute_command(cli: &Cli) -> speedrun_cli::Result<()> {
    let config = Config::from_cli(cli)?;

    match &cli.command {
        Commands::Collect(args) => speedrun_cli::commands::collect::run(&config, args)
            .await
            .map(|_| ()),
        Commands::Dashboard(args) => speedrun_cli::commands::dashboard::run(&config, args).await,
        Commands::Run { collect, dashboard } => {
            speedrun_cli::commands::run::run(&config, collect, dashboard).await
        },
    }
}
