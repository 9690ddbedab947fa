//! Speedrun CLI Library
//!
//! Command-line interface for collecting speedrun.com leaderboards and
//! exploring them in the terminal.
//!
//! # Overview
//!
//! - **Collection**: Download every category of the configured games (`speedrun collect`)
//! - **Dashboard**: Clean, analyse and display the collected datasets (`speedrun dashboard`)
//! - **Full run**: Collect, then show the dashboard (`speedrun run`)

pub mod commands;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod loader;
pub mod progress;

// Re-export commonly used types
pub use error::{CliError, Result};
pub use loader::{CategoryNames, LoadedDataset, Loader};

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Speedrun leaderboard analytics
#[derive(Parser, Debug)]
#[command(name = "speedrun")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// speedrun.com API base URL
    #[arg(long, env = "SPEEDRUN_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Directory holding the collected datasets
    #[arg(long, env = "SPEEDRUN_DATA_DIR", default_value = config::DEFAULT_DATA_DIR, global = true)]
    pub data_dir: PathBuf,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect leaderboard runs into the data directory
    Collect(CollectArgs),

    /// Analyse the collected datasets and display them
    Dashboard(DashboardArgs),

    /// Collect, then display the dashboard
    Run {
        #[command(flatten)]
        collect: CollectArgs,

        #[command(flatten)]
        dashboard: DashboardArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct CollectArgs {
    /// Game to collect, as a key (e.g. "celeste") or a raw game id; repeatable.
    /// Defaults to every configured game.
    #[arg(short, long = "game")]
    pub games: Vec<String>,

    /// Maximum runs collected per category
    #[arg(long)]
    pub max_runs: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct DashboardArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Only show details for one dataset, given as "<game_id>_<category_id>"
    #[arg(short, long)]
    pub select: Option<String>,

    /// Number of players listed in the leaderboard of most active runners
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Never query the API for category names
    #[arg(long)]
    pub offline: bool,
}

impl Default for DashboardArgs {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            select: None,
            top: 10,
            offline: false,
        }
    }
}

/// How the dashboard is printed
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Colored tables for the terminal
    #[default]
    Table,
    /// Pretty-printed JSON array of datasets
    Json,
}
