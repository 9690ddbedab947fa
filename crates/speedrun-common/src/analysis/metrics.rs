use super::stats::{mean, median, sample_std};
use super::trend::{monthly_counts, trend_metrics};
use crate::types::RunRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Weight of the normalized time deviation in the difficulty score
const VARIANCE_WEIGHT: f64 = 0.6;

/// Weight of the relative time spread in the difficulty score
const SPREAD_WEIGHT: f64 = 0.4;

/// Summary of a cleaned dataset
///
/// Field names are part of the serialized dashboard shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_runs: usize,
    pub unique_players: usize,
    pub avg_time: f64,
    pub median_time: f64,
    /// Sample standard deviation; 0 with fewer than two runs
    pub std_time: f64,
    pub best_time: f64,
    /// Runs per platform display name
    pub platform_distribution: BTreeMap<String, usize>,
    pub emulator_percentage: f64,
    /// Mean number of runs per calendar month that has runs
    pub runs_per_month: f64,
    pub difficulty_score: f64,
    pub trend_coefficient: f64,
    pub monthly_growth: f64,
}

impl Metrics {
    /// The all-zero metrics of an empty dataset
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Compute [`Metrics`] over a cleaned dataset
pub fn compute_metrics(records: &[RunRecord]) -> Metrics {
    if records.is_empty() {
        return Metrics::empty();
    }

    let times: Vec<f64> = records.iter().map(|r| r.time_seconds).collect();
    let total = records.len();

    let unique_players = records
        .iter()
        .map(|r| r.player.as_str())
        .collect::<HashSet<_>>()
        .len();

    let mut platform_distribution = BTreeMap::new();
    for record in records {
        *platform_distribution
            .entry(record.platform.clone())
            .or_insert(0) += 1;
    }

    let emulated = records.iter().filter(|r| r.emulator).count();
    let months = monthly_counts(records).len();
    let trend = trend_metrics(records);

    Metrics {
        total_runs: total,
        unique_players,
        avg_time: mean(&times).unwrap_or(0.0),
        median_time: median(&times).unwrap_or(0.0),
        std_time: sample_std(&times).unwrap_or(0.0),
        best_time: times.iter().copied().fold(f64::INFINITY, f64::min),
        platform_distribution,
        emulator_percentage: emulated as f64 / total as f64 * 100.0,
        runs_per_month: total as f64 / months as f64,
        difficulty_score: difficulty_score(&times),
        trend_coefficient: trend.trend_coefficient,
        monthly_growth: trend.monthly_growth,
    }
}

/// Blend of how inconsistent completion times are, scaled by 100
///
/// `100 * (0.6 * std(normalized) + 0.4 * (max - min) / median)` where
/// `normalized = (t - min) / (max - min)`. The deviation term is 0 when every
/// time is identical or there is a single time, so the score is always finite.
pub fn difficulty_score(times: &[f64]) -> f64 {
    if times.is_empty() {
        return 0.0;
    }

    let min = times.iter().copied().fold(f64::INFINITY, f64::min);
    let max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let deviation = if range > 0.0 {
        let normalized: Vec<f64> = times.iter().map(|t| (t - min) / range).collect();
        sample_std(&normalized).unwrap_or(0.0)
    } else {
        0.0
    };

    let spread = match median(times) {
        Some(m) if m > 0.0 => range / m,
        _ => 0.0,
    };

    100.0 * (VARIANCE_WEIGHT * deviation + SPREAD_WEIGHT * spread)
}
