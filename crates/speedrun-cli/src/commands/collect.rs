//! `speedrun collect` command implementation
//!
//! Sweeps every category of the selected games into the data directory.

use crate::config::{selected_game_ids, Config};
use crate::error::Result;
use crate::progress::create_spinner;
use crate::CollectArgs;
use colored::Colorize;
use speedrun_ingest::{sweep, ApiClient, SweepSummary};
use tracing::info;

/// Collect and persist datasets, then print a summary
pub async fn run(config: &Config, args: &CollectArgs) -> Result<SweepSummary> {
    let (summary, config) = collect(config, args).await?;
    print!("{}", format_summary(&summary, &config));
    Ok(summary)
}

/// Collect and persist datasets without printing anything
///
/// Returns the summary together with the effective configuration.
pub async fn collect(config: &Config, args: &CollectArgs) -> Result<(SweepSummary, Config)> {
    let config = config.clone().with_collect_args(args);
    let games = selected_game_ids(args);
    let client = ApiClient::new(&config.api)?;

    info!(
        games = games.len(),
        api = client.base_url(),
        data_dir = %config.data_dir.display(),
        "Starting collection"
    );

    let spinner = create_spinner(&format!("Collecting {} game(s) from {}", games.len(), client.base_url()));
    let summary = sweep(&client, &config.api, &config.data_dir, &games).await;
    spinner.finish_and_clear();

    Ok((summary, config))
}

pub fn format_summary(summary: &SweepSummary, config: &Config) -> String {
    let mut out = format!("{}\n", "Collection summary:".cyan().bold());
    out.push_str(&format!(
        "  Games:      {} ({} failed)\n",
        summary.games_total, summary.games_failed
    ));
    out.push_str(&format!(
        "  Categories: {} saved, {} empty, {} failed\n",
        summary.categories_saved.to_string().green(),
        summary.categories_empty,
        if summary.categories_failed > 0 {
            summary.categories_failed.to_string().red()
        } else {
            summary.categories_failed.to_string().normal()
        }
    ));
    out.push_str(&format!("  Runs saved: {}\n", summary.runs_saved));
    out.push_str(&format!("  Data dir:   {}\n", config.data_dir.display()));
    out
}
