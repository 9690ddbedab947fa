//! Error types for collection and persistence
//!
//! Transport and upstream failures are errors and propagate to the caller.
//! Records that fail validation are not errors; see [`crate::validate::SkipReason`].

use thiserror::Error;

/// Result type alias for ingest operations
pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    /// Request could not be sent or the body could not be read
    #[error("Network request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered, but the body did not have the expected shape
    #[error("Unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status
    #[error("API request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IngestError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the failure came from talking to the remote API
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            IngestError::Http(_) | IngestError::Status { .. } | IngestError::Decode { .. }
        )
    }
}
