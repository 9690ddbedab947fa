use super::stats::{linear_slope, mean};
use crate::types::RunRecord;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Activity trend over calendar months
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendMetrics {
    /// Least squares slope of runs per month against month index
    pub trend_coefficient: f64,
    /// Mean month-over-month change in run count, in percent
    pub monthly_growth: f64,
}

/// Run counts per `(year, month)`, chronological, months without runs omitted
pub fn monthly_counts(records: &[RunRecord]) -> BTreeMap<(i32, u32), usize> {
    let mut buckets = BTreeMap::new();
    for record in records {
        *buckets
            .entry((record.date.year(), record.date.month()))
            .or_insert(0) += 1;
    }
    buckets
}

/// Trend over the months present in `records`
///
/// Both values are 0 when fewer than two months have runs.
pub fn trend_metrics(records: &[RunRecord]) -> TrendMetrics {
    let counts: Vec<f64> = monthly_counts(records)
        .values()
        .map(|&c| c as f64)
        .collect();

    let changes: Vec<f64> = counts
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .collect();

    TrendMetrics {
        trend_coefficient: linear_slope(&counts).unwrap_or(0.0),
        monthly_growth: mean(&changes).map(|g| g * 100.0).unwrap_or(0.0),
    }
}

/// Mean time per calendar year, chronological
pub fn yearly_mean_times(records: &[RunRecord]) -> Vec<(i32, f64)> {
    let mut years: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for record in records {
        let entry = years.entry(record.date.year()).or_insert((0.0, 0));
        entry.0 += record.time_seconds;
        entry.1 += 1;
    }
    years
        .into_iter()
        .map(|(year, (sum, count))| (year, sum / count as f64))
        .collect()
}

/// The `n` players with the most runs, most active first, ties broken by id
pub fn top_players(records: &[RunRecord], n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.player.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(player, count)| (player.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}
