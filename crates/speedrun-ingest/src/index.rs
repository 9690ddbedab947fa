//! Category display names recorded during collection
//!
//! Stored next to the datasets as `categories.json`, a flat object mapping
//! `{game_id}_{category_id}` to the category name, so the loader can label
//! datasets without going back to the network.

use crate::error::Result;
use crate::storage::temp_file_in;
use serde::{Deserialize, Serialize};
use speedrun_common::DatasetKey;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CATEGORY_INDEX_FILE: &str = "categories.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryIndex {
    names: BTreeMap<String, String>,
}

impl CategoryIndex {
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(CATEGORY_INDEX_FILE)
    }

    /// Load the index from `dir`; a missing file is an empty index
    pub fn load(dir: &Path) -> Result<Self> {
        let path = Self::path_in(dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let index: Self = serde_json::from_slice(&fs::read(&path)?)?;
        debug!(path = %path.display(), entries = index.len(), "Loaded category index");
        Ok(index)
    }

    /// Write the index to `dir` through a temporary file
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = Self::path_in(dir);

        let mut tmp = temp_file_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, self)?;
        tmp.write_all(b"\n")?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(path)
    }

    pub fn get(&self, key: &DatasetKey) -> Option<&str> {
        self.names.get(&key.to_string()).map(String::as_str)
    }

    pub fn insert(&mut self, key: &DatasetKey, name: impl Into<String>) {
        self.names.insert(key.to_string(), name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_index_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(CategoryIndex::load(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let key = DatasetKey::new("o1y9wo6q", "wkpoo02r");

        let mut index = CategoryIndex::default();
        index.insert(&key, "120 Star");
        index.save(dir.path()).unwrap();

        let raw = fs::read_to_string(dir.path().join(CATEGORY_INDEX_FILE)).unwrap();
        assert!(raw.contains("\"o1y9wo6q_wkpoo02r\": \"120 Star\""));

        let loaded = CategoryIndex::load(dir.path()).unwrap();
        assert_eq!(loaded.get(&key), Some("120 Star"));
        assert_eq!(loaded.get(&DatasetKey::new("o1y9wo6q", "other")), None);
    }

    #[test]
    fn test_corrupt_index_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CATEGORY_INDEX_FILE), "not json").unwrap();
        assert!(CategoryIndex::load(dir.path()).is_err());
    }
}
