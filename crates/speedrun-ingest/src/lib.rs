//! Speedrun Ingest Library
//!
//! Collection of leaderboard runs from the speedrun.com REST API into
//! per-category CSV datasets.
//!
//! # Pipeline
//!
//! - **API**: `reqwest` client for category and run listings
//! - **Validation**: required-field and primary-time checks on raw records
//! - **Processing**: raw record → [`speedrun_common::RunRecord`]
//! - **Collection**: offset pagination up to a record cap
//! - **Storage**: atomic CSV writes plus a category name index
//! - **Sweep**: every category of every configured game
//!
//! # Example
//!
//! ```no_run
//! use speedrun_ingest::{ApiClient, ApiConfig, sweep};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::from_env()?;
//!     let client = ApiClient::new(&config)?;
//!     let games = vec!["o1y9wo6q".to_string()];
//!     let summary = sweep(&client, &config, Path::new("./data"), &games).await;
//!     println!("{} datasets saved", summary.categories_saved);
//!     Ok(())
//! }
//! ```
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod api;
pub mod collector;
pub mod config;
pub mod error;
pub mod index;
pub mod processor;
pub mod storage;
pub mod sweep;
pub mod validate;

pub use api::ApiClient;
pub use collector::{CollectStats, Collector};
pub use config::ApiConfig;
pub use error::{IngestError, Result};
pub use index::CategoryIndex;
pub use sweep::{sweep, SweepSummary};
pub use validate::SkipReason;
