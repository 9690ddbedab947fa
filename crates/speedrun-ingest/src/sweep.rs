//! Collect every category of a list of games into a data directory
//!
//! A failure while listing a game's categories, or while collecting or
//! saving one category, is logged and counted; the sweep moves on to the
//! next unit of work. Requests are awaited one after another with a fixed
//! pause between category collections.

use crate::api::ApiClient;
use crate::collector::Collector;
use crate::config::ApiConfig;
use crate::index::CategoryIndex;
use crate::storage::write_dataset;
use serde::{Deserialize, Serialize};
use speedrun_common::DatasetKey;
use std::path::Path;
use tracing::{error, info, warn};

/// Outcome counts of one sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub games_total: usize,
    pub games_failed: usize,
    pub categories_saved: usize,
    pub categories_empty: usize,
    pub categories_failed: usize,
    pub runs_saved: usize,
}

impl SweepSummary {
    /// Whether nothing at all was collected
    pub fn is_empty(&self) -> bool {
        self.categories_saved == 0
    }
}

/// Collect and persist every category of every game in `game_ids`
pub async fn sweep(
    client: &ApiClient,
    config: &ApiConfig,
    data_dir: &Path,
    game_ids: &[String],
) -> SweepSummary {
    let collector = Collector::new(client);
    let mut summary = SweepSummary {
        games_total: game_ids.len(),
        ..SweepSummary::default()
    };

    let mut index = CategoryIndex::load(data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "Category index unreadable, starting a new one");
        CategoryIndex::default()
    });

    let mut first_request = true;

    for game_id in game_ids {
        let categories = match client.list_categories(game_id).await {
            Ok(categories) => categories,
            Err(e) => {
                error!(game_id = %game_id, error = %e, "Failed to list categories");
                summary.games_failed += 1;
                continue;
            },
        };
        info!(game_id = %game_id, categories = categories.len(), "Collecting game");

        for category in &categories {
            if !first_request && !config.request_delay().is_zero() {
                tokio::time::sleep(config.request_delay()).await;
            }
            first_request = false;

            let key = DatasetKey::new(game_id.as_str(), category.id.as_str());
            let records = match collector
                .collect(game_id, Some(category.id.as_str()), config.max_runs)
                .await
            {
                Ok(records) => records,
                Err(e) => {
                    error!(dataset = %key, error = %e, "Collection failed");
                    summary.categories_failed += 1;
                    continue;
                },
            };

            if records.is_empty() {
                info!(dataset = %key, "No valid runs, nothing saved");
                summary.categories_empty += 1;
                continue;
            }

            match write_dataset(data_dir, &key, &records) {
                Ok(_) => {
                    summary.categories_saved += 1;
                    summary.runs_saved += records.len();
                    index.insert(&key, category.name.as_str());
                },
                Err(e) => {
                    error!(dataset = %key, error = %e, "Failed to save dataset");
                    summary.categories_failed += 1;
                },
            }
        }

        if let Err(e) = index.save(data_dir) {
            error!(error = %e, "Failed to save category index");
        }
    }

    info!(
        games = summary.games_total,
        games_failed = summary.games_failed,
        saved = summary.categories_saved,
        empty = summary.categories_empty,
        failed = summary.categories_failed,
        runs = summary.runs_saved,
        "Sweep finished"
    );
    summary
}
