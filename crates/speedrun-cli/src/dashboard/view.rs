//! Presentation model derived from loaded datasets

use crate::error::{CliError, Result};
use crate::loader::LoadedDataset;
use speedrun_common::analysis::{top_players, yearly_mean_times};
use speedrun_common::{DatasetKey, RunRecord};

/// Records listed in the detail table of a dataset
pub const RECENT_RECORDS_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct PlatformShare {
    pub name: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmulatorSplit {
    pub emulator: usize,
    pub original: usize,
}

/// Everything the detail section shows for one dataset
#[derive(Debug)]
pub struct DatasetView<'a> {
    pub dataset: &'a LoadedDataset,
    /// Most used platform first
    pub platforms: Vec<PlatformShare>,
    pub emulator: EmulatorSplit,
    pub yearly: Vec<(i32, f64)>,
    pub top_players: Vec<(String, usize)>,
    /// First records in date order
    pub records: &'a [RunRecord],
}

impl<'a> DatasetView<'a> {
    pub fn build(dataset: &'a LoadedDataset, top_n: usize) -> Self {
        let total = dataset.metrics.total_runs.max(1) as f64;
        let mut platforms: Vec<PlatformShare> = dataset
            .metrics
            .platform_distribution
            .iter()
            .map(|(name, &count)| PlatformShare {
                name: name.clone(),
                count,
                percentage: 100.0 * count as f64 / total,
            })
            .collect();
        platforms.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

        let emulator = dataset.records.iter().filter(|r| r.emulator).count();

        Self {
            dataset,
            platforms,
            emulator: EmulatorSplit {
                emulator,
                original: dataset.records.len() - emulator,
            },
            yearly: yearly_mean_times(&dataset.records),
            top_players: top_players(&dataset.records, top_n),
            records: &dataset.records[..dataset.records.len().min(RECENT_RECORDS_LIMIT)],
        }
    }
}

/// Datasets to show in detail
///
/// With no selection every dataset is shown. A selection must name a loaded
/// dataset as `<game_id>_<category_id>`.
pub fn select<'a>(
    datasets: &'a [LoadedDataset],
    selection: Option<&str>,
) -> Result<Vec<&'a LoadedDataset>> {
    let Some(raw) = selection else {
        return Ok(datasets.iter().collect());
    };

    let key: DatasetKey = raw.trim().parse()?;
    datasets
        .iter()
        .find(|d| d.game_id == key.game_id && d.category_id == key.category_id)
        .map(|d| vec![d])
        .ok_or_else(|| CliError::UnknownDataset(raw.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub(crate) mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use speedrun_common::analysis::compute_metrics;

    pub(crate) fn record(id: usize, year: i32, platform: &str, emulator: bool) -> RunRecord {
        RunRecord {
            run_id: format!("r{}", id),
            category: "wkpoo02r".to_string(),
            date: NaiveDate::from_ymd_opt(year, 1 + (id % 12) as u32, 1).unwrap(),
            time_seconds: 100.0 + id as f64,
            player: format!("p{}", id % 3),
            verified: true,
            platform: platform.to_string(),
            emulator,
        }
    }

    pub(crate) fn dataset(game_id: &str, category_id: &str, records: Vec<RunRecord>) -> LoadedDataset {
        LoadedDataset {
            game_id: game_id.to_string(),
            game_name: game_id.to_string(),
            category_id: category_id.to_string(),
            category_name: category_id.to_string(),
            metrics: compute_metrics(&records),
            records,
            processed_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_view() {
        let records: Vec<RunRecord> = (0..60)
            .map(|i| {
                let platform = if i % 4 == 0 { "Wii" } else { "PC" };
                record(i, 2019 + (i / 20) as i32, platform, i % 5 == 0)
            })
            .collect();
        let data = dataset("g", "c", records);
        let view = DatasetView::build(&data, 2);

        assert_eq!(view.platforms[0].name, "PC");
        assert_eq!(view.platforms[0].count, 45);
        assert!((view.platforms[0].percentage - 75.0).abs() < 1e-9);
        assert_eq!(view.emulator, EmulatorSplit { emulator: 12, original: 48 });
        assert_eq!(view.yearly.len(), 3);
        assert_eq!(view.top_players.len(), 2);
        assert_eq!(view.records.len(), RECENT_RECORDS_LIMIT);
    }

    #[test]
    fn test_select() {
        let datasets = vec![
            dataset("a", "x", vec![record(1, 2020, "PC", false)]),
            dataset("b", "y", vec![record(2, 2020, "PC", false)]),
        ];

        assert_eq!(select(&datasets, None).unwrap().len(), 2);

        let picked = select(&datasets, Some("b_y")).unwrap();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].game_id, "b");

        assert!(matches!(
            select(&datasets, Some("b_z")),
            Err(CliError::UnknownDataset(_))
        ));
        assert!(matches!(select(&datasets, Some("bad")), Err(CliError::Common(_))));
    }
}
