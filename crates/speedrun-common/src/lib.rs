//! Speedrun Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, lookup tables, analysis and error handling for the speedrun
//! analytics workspace.
//!
//! # Overview
//!
//! - **Error Handling**: Custom error type and result alias
//! - **Logging**: `tracing` subscriber setup shared by every binary
//! - **Types**: Normalized run records and dataset keys
//! - **Lookup tables**: Static game and platform names
//! - **Analysis**: Cleaning (dedup + IQR outlier removal), metrics and trends
//!
//! # Example
//!
//! ```no_run
//! use speedrun_common::analysis::{clean, compute_metrics};
//! use speedrun_common::types::RunRecord;
//!
//! fn summarize(records: &[RunRecord]) {
//!     let cleaned = clean(records);
//!     let metrics = compute_metrics(&cleaned);
//!     tracing::info!(total = metrics.total_runs, score = metrics.difficulty_score, "Summary");
//! }
//! ```

pub mod analysis;
pub mod error;
pub mod games;
pub mod logging;
pub mod platforms;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SpeedrunError};
pub use types::{DatasetKey, RunRecord};
