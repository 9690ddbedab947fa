use super::stats::{quantile_sorted, sorted};
use crate::types::RunRecord;
use std::collections::HashSet;
use tracing::debug;

/// Multiplier applied to the interquartile range for the outlier fences
const IQR_FENCE: f64 = 1.5;

/// Prepare a dataset for metrics
///
/// 1. drops exact duplicates, keeping the first occurrence
/// 2. drops rows whose time is not a finite number
/// 3. sorts by date (stable, so equal dates keep their collection order)
/// 4. keeps rows inside `[Q1 - 1.5 IQR, Q3 + 1.5 IQR]`, with the quartiles
///    computed once over the deduplicated, sorted rows
///
/// Step 4 is a single pass; rows that only become outliers relative to the
/// filtered set are kept.
pub fn clean(records: &[RunRecord]) -> Vec<RunRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut rows: Vec<RunRecord> = records
        .iter()
        .filter(|r| seen.insert(r.identity()))
        .filter(|r| r.time_seconds.is_finite())
        .cloned()
        .collect();

    rows.sort_by_key(|r| r.date);

    let times: Vec<f64> = rows.iter().map(|r| r.time_seconds).collect();
    let Some((low, high)) = iqr_fences(&times) else {
        return rows;
    };

    let before = rows.len();
    rows.retain(|r| r.time_seconds >= low && r.time_seconds <= high);
    debug!(
        input = records.len(),
        deduplicated = before,
        kept = rows.len(),
        low,
        high,
        "Cleaned dataset"
    );

    rows
}

/// Lower and upper outlier fences for `times`, `None` when empty
pub fn iqr_fences(times: &[f64]) -> Option<(f64, f64)> {
    let sorted = sorted(times);
    let q1 = quantile_sorted(&sorted, 0.25)?;
    let q3 = quantile_sorted(&sorted, 0.75)?;
    let iqr = q3 - q1;
    Some((q1 - IQR_FENCE * iqr, q3 + IQR_FENCE * iqr))
}
