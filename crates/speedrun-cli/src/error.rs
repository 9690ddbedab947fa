//! Error types for the speedrun CLI
//!
//! Messages are user facing and end with a hint on how to recover.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// No dataset could be loaded from the data directory
    #[error("No data found in '{0}'. Run 'speedrun collect' first to download leaderboard data.")]
    NoData(String),

    /// The selected dataset is not among the loaded ones
    #[error("Dataset '{0}' not found. Use the overview table of 'speedrun dashboard' to see available datasets.")]
    UnknownDataset(String),

    /// Collection or storage failed
    #[error("{0}. Check your internet connection and the API URL.")]
    Ingest(#[from] speedrun_ingest::IngestError),

    #[error(transparent)]
    Common(#[from] speedrun_common::SpeedrunError),

    /// JSON serialization failed
    #[error("Failed to produce JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn no_data(dir: impl AsRef<std::path::Path>) -> Self {
        Self::NoData(dir.as_ref().display().to_string())
    }
}
