//! Common types used across the workspace

use crate::error::{Result, SpeedrunError};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Player id used when a run lists no players
pub const UNKNOWN_PLAYER: &str = "unknown";

/// A normalized leaderboard run
///
/// Built once from a validated API record and never mutated afterwards. The
/// field order is the column order of the persisted CSV files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Run id as assigned by the API
    pub run_id: String,

    /// Category id
    pub category: String,

    /// Date the run was performed
    pub date: NaiveDate,

    /// Primary time in seconds, always positive
    pub time_seconds: f64,

    /// First listed player id, or [`UNKNOWN_PLAYER`]
    pub player: String,

    /// Whether the run was verified by moderators
    #[serde(deserialize_with = "lenient_bool")]
    pub verified: bool,

    /// Platform display name, or the raw platform id when unmapped
    pub platform: String,

    /// Whether the run was played on an emulator
    #[serde(deserialize_with = "lenient_bool")]
    pub emulator: bool,
}

impl RunRecord {
    /// Key under which two records count as exact duplicates
    ///
    /// Times are compared bit for bit, matching a plain equality check on
    /// every column.
    pub fn identity(&self) -> RecordIdentity<'_> {
        RecordIdentity {
            run_id: &self.run_id,
            category: &self.category,
            date: self.date,
            time_bits: self.time_seconds.to_bits(),
            player: &self.player,
            verified: self.verified,
            platform: &self.platform,
            emulator: self.emulator,
        }
    }
}

/// Hashable view of every [`RunRecord`] column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordIdentity<'a> {
    run_id: &'a str,
    category: &'a str,
    date: NaiveDate,
    time_bits: u64,
    player: &'a str,
    verified: bool,
    platform: &'a str,
    emulator: bool,
}

/// Accept real booleans as well as `true`/`false`, `True`/`False` and `1`/`0`
/// text, the spellings spreadsheet tools write back into CSV files.
fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolLike {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match BoolLike::deserialize(deserializer)? {
        BoolLike::Bool(b) => Ok(b),
        BoolLike::Int(1) => Ok(true),
        BoolLike::Int(0) => Ok(false),
        BoolLike::Int(other) => Err(serde::de::Error::custom(format!("invalid boolean '{}'", other))),
        BoolLike::Text(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(serde::de::Error::custom(format!("invalid boolean '{}'", other))),
        },
    }
}

/// Identifies one persisted dataset: a (game, category) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DatasetKey {
    pub game_id: String,
    pub category_id: String,
}

impl DatasetKey {
    pub fn new(game_id: impl Into<String>, category_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            category_id: category_id.into(),
        }
    }

    /// Parse `{game_id}_{category_id}` out of a dataset file path
    ///
    /// The stem must split on `_` into exactly two non-empty parts.
    pub fn from_path(path: &Path) -> Result<Self> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| SpeedrunError::InvalidDatasetKey(path.display().to_string()))?;
        stem.parse()
    }

    /// File name for this key with the given extension
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self, extension)
    }
}

impl std::str::FromStr for DatasetKey {
    type Err = SpeedrunError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('_').collect();
        match parts.as_slice() {
            [game, category] if !game.is_empty() && !category.is_empty() => {
                Ok(Self::new(*game, *category))
            },
            _ => Err(SpeedrunError::InvalidDatasetKey(s.to_string())),
        }
    }
}

impl std::fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.game_id, self.category_id)
    }
}
