//! Dataset analysis
//!
//! Pure functions over slices of [`RunRecord`](crate::types::RunRecord):
//!
//! - [`clean`]: exact-duplicate removal, date ordering, one-pass IQR outlier filter
//! - [`compute_metrics`]: summary statistics and the difficulty score
//! - [`yearly_mean_times`] / [`top_players`]: series used by the dashboard
//!
//! None of these fail: degenerate input (empty, single value, zero spread)
//! produces zeroed values instead of errors.

mod clean;
mod metrics;
pub mod stats;
mod trend;

pub use clean::{clean, iqr_fences};
pub use metrics::{compute_metrics, difficulty_score, Metrics};
pub use trend::{monthly_counts, top_players, trend_metrics, yearly_mean_times, TrendMetrics};
