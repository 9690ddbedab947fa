//! Configuration management for the speedrun CLI
//!
//! Environment variables (and `.env`, loaded in `main`) provide the base
//! [`ApiConfig`]; command line flags override it.

use crate::error::Result;
use crate::{Cli, CollectArgs};
use speedrun_common::games::{game_ids, resolve_game_id};
use speedrun_ingest::ApiConfig;
use std::path::PathBuf;

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Data directory used when neither `--data-dir` nor `SPEEDRUN_DATA_DIR` is set.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Effective settings for one invocation
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding dataset files and the category index
    pub data_dir: PathBuf,

    /// API access settings
    pub api: ApiConfig,
}

impl Config {
    /// Build from the environment plus global command line flags
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut api = ApiConfig::from_env()?;
        if let Some(ref url) = cli.api_url {
            api = api.with_base_url(url.clone());
            api.validate()?;
        }

        Ok(Self {
            data_dir: cli.data_dir.clone(),
            api,
        })
    }

    /// Apply `collect` flags
    pub fn with_collect_args(mut self, args: &CollectArgs) -> Self {
        if let Some(max) = args.max_runs {
            self.api = self.api.with_max_runs(max);
        }
        self
    }
}

/// Game ids to collect: the `--game` values resolved through the game table,
/// or every configured game when none was given
pub fn selected_game_ids(args: &CollectArgs) -> Vec<String> {
    if args.games.is_empty() {
        game_ids().into_iter().map(str::to_string).collect()
    } else {
        args.games
            .iter()
            .map(|g| resolve_game_id(g.trim()).to_string())
            .collect()
    }
}
