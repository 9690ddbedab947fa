//! Error types shared across the workspace

use thiserror::Error;

/// Result type alias for speedrun operations
pub type Result<T> = std::result::Result<T, SpeedrunError>;

/// Main error type for the shared library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeedrunError {
    #[error("Invalid dataset key '{0}': expected '<game_id>_<category_id>'")]
    InvalidDatasetKey(String),
}
