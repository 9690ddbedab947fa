//! Paginated run collection
//!
//! A collection walks `/runs` for one (game, category) pair, validating and
//! normalizing every record of every page. The offset always advances by the
//! number of raw records the page carried, so a page full of unusable records
//! still moves the cursor forward.

use crate::api::ApiClient;
use crate::error::Result;
use crate::processor::process_run;
use crate::validate::validate_run;
use speedrun_common::RunRecord;
use tracing::{debug, info, instrument};

/// Counters for a single collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectStats {
    pub pages_fetched: usize,
    pub raw_seen: usize,
    pub accepted: usize,
    pub skipped: usize,
}

/// Collects runs through an [`ApiClient`]
pub struct Collector<'a> {
    client: &'a ApiClient,
}

impl<'a> Collector<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Collect up to `max_runs` normalized records
    ///
    /// Stops on the first empty page or once `max_runs` records have been
    /// accepted. Transport and status errors propagate; invalid records are
    /// skipped and counted.
    pub async fn collect(
        &self,
        game_id: &str,
        category_id: Option<&str>,
        max_runs: usize,
    ) -> Result<Vec<RunRecord>> {
        let (records, _) = self.collect_with_stats(game_id, category_id, max_runs).await?;
        Ok(records)
    }

    /// Same as [`Collector::collect`], also returning the counters
    #[instrument(skip(self))]
    pub async fn collect_with_stats(
        &self,
        game_id: &str,
        category_id: Option<&str>,
        max_runs: usize,
    ) -> Result<(Vec<RunRecord>, CollectStats)> {
        let mut records = Vec::new();
        let mut stats = CollectStats::default();
        let mut offset = 0usize;

        while records.len() < max_runs {
            let page = self.client.list_runs(game_id, category_id, offset).await?;
            stats.pages_fetched += 1;

            if page.data.is_empty() {
                debug!(offset, "Empty page, collection complete");
                break;
            }

            let page_len = page.data.len();
            stats.raw_seen += page_len;

            for raw in &page.data {
                match validate_run(raw).and_then(process_run) {
                    Ok(record) => records.push(record),
                    Err(_) => stats.skipped += 1,
                }
            }

            debug!(offset, page_len, total = records.len(), "Fetched page");
            offset += page_len;
        }

        records.truncate(max_runs);
        stats.accepted = records.len();

        info!(
            game_id,
            category_id = category_id.unwrap_or("-"),
            pages = stats.pages_fetched,
            raw = stats.raw_seen,
            accepted = stats.accepted,
            skipped = stats.skipped,
            "Collection finished"
        );

        Ok((records, stats))
    }
}
