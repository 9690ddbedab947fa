//! Loading persisted datasets for display
//!
//! Every `{game_id}_{category_id}.csv` in the data directory is read, cleaned
//! and summarized into a [`LoadedDataset`]. A file that cannot be used (bad
//! name, unreadable rows, no rows) is logged and skipped; the rest of the
//! directory still loads.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use speedrun_common::analysis::{clean, compute_metrics, Metrics};
use speedrun_common::games::game_name;
use speedrun_common::{DatasetKey, RunRecord};
use speedrun_ingest::storage::{list_dataset_files, read_dataset};
use speedrun_ingest::{ApiClient, CategoryIndex};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument, warn};

/// One (game, category) dataset ready for display
#[derive(Debug, Clone, Serialize)]
pub struct LoadedDataset {
    pub game_id: String,
    pub game_name: String,
    pub category_id: String,
    pub category_name: String,
    /// Cleaned records, ordered by date
    pub records: Vec<RunRecord>,
    pub processed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub metrics: Metrics,
}

impl LoadedDataset {
    pub fn key(&self) -> DatasetKey {
        DatasetKey::new(self.game_id.as_str(), self.category_id.as_str())
    }
}

/// Category display names
///
/// Looked up in the collection-time index first, then (unless offline) in
/// the live API once per game. Anything unresolved shows as the raw id.
pub struct CategoryNames {
    index: CategoryIndex,
    client: Option<ApiClient>,
    live: HashMap<String, HashMap<String, String>>,
}

impl CategoryNames {
    /// Names from the index only
    pub fn offline(index: CategoryIndex) -> Self {
        Self {
            index,
            client: None,
            live: HashMap::new(),
        }
    }

    /// Names from the index, falling back to live lookups through `client`
    pub fn with_client(index: CategoryIndex, client: ApiClient) -> Self {
        Self {
            index,
            client: Some(client),
            live: HashMap::new(),
        }
    }

    /// Resolve the display name of `key`'s category
    pub async fn resolve(&mut self, key: &DatasetKey) -> String {
        if let Some(name) = self.index.get(key) {
            return name.to_string();
        }

        if let Some(ref client) = self.client {
            if !self.live.contains_key(&key.game_id) {
                let names = match client.list_categories(&key.game_id).await {
                    Ok(categories) => categories
                        .into_iter()
                        .map(|c| (c.id, c.name))
                        .collect(),
                    Err(e) => {
                        warn!(game_id = %key.game_id, error = %e, "Category lookup failed, showing raw ids");
                        HashMap::new()
                    },
                };
                self.live.insert(key.game_id.clone(), names);
            }

            if let Some(name) = self
                .live
                .get(&key.game_id)
                .and_then(|names| names.get(&key.category_id))
            {
                return name.clone();
            }
        }

        key.category_id.clone()
    }
}

/// Reads every dataset of a data directory
pub struct Loader {
    data_dir: PathBuf,
    names: CategoryNames,
}

impl Loader {
    pub fn new(data_dir: impl Into<PathBuf>, names: CategoryNames) -> Self {
        Self {
            data_dir: data_dir.into(),
            names,
        }
    }

    /// Load every usable dataset, in file name order
    #[instrument(skip(self), fields(data_dir = %self.data_dir.display()))]
    pub async fn load(&mut self) -> Result<Vec<LoadedDataset>> {
        let files = list_dataset_files(&self.data_dir)?;
        let mut datasets = Vec::with_capacity(files.len());

        for path in files {
            if let Some(dataset) = self.load_file(&path).await {
                datasets.push(dataset);
            }
        }

        info!(files = datasets.len(), "Datasets loaded");
        Ok(datasets)
    }

    async fn load_file(&mut self, path: &Path) -> Option<LoadedDataset> {
        let key = match DatasetKey::from_path(path) {
            Ok(key) => key,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Skipping file with malformed name");
                return None;
            },
        };

        let raw = match read_dataset(path) {
            Ok(records) => records,
            Err(e) => {
                error!(file = %path.display(), error = %e, "Failed to read dataset");
                return None;
            },
        };

        if raw.is_empty() {
            warn!(file = %path.display(), "Skipping empty dataset");
            return None;
        }

        let category_name = self.names.resolve(&key).await;
        let records = clean(&raw);
        let metrics = compute_metrics(&records);
        debug!(dataset = %key, raw = raw.len(), kept = records.len(), "Dataset cleaned");

        Some(LoadedDataset {
            game_name: game_name(&key.game_id).to_string(),
            game_id: key.game_id,
            category_id: key.category_id,
            category_name,
            records,
            processed_at: Utc::now(),
            metrics,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use speedrun_ingest::ApiConfig;
    use std::fs;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const HEADER: &str = "run_id,category,date,time_seconds,player,verified,platform,emulator\n";

    fn write_csv(dir: &Path, name: &str, rows: &[&str]) {
        let mut contents = HEADER.to_string();
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        fs::write(dir.join(name), contents).unwrap();
    }

    fn three_rows() -> [&'static str; 3] {
        [
            "r1,def,2021-03-01,100.0,p1,true,PC,false",
            "r2,def,2021-01-01,110.0,p2,true,PC,true",
            "r3,def,2021-02-01,130.0,p1,true,Wii,false",
        ]
    }

    #[tokio::test]
    async fn test_load_single_dataset() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "abc_def.csv", &three_rows());

        let mut loader = Loader::new(dir.path(), CategoryNames::offline(CategoryIndex::default()));
        let datasets = loader.load().await.unwrap();

        assert_eq!(datasets.len(), 1);
        let dataset = &datasets[0];
        assert_eq!(dataset.game_id, "abc");
        assert_eq!(dataset.game_name, "abc");
        assert_eq!(dataset.category_id, "def");
        assert_eq!(dataset.category_name, "def");
        assert!(dataset.metrics.total_runs <= 3);
        assert_eq!(dataset.metrics.total_runs, dataset.records.len());
        assert_eq!(dataset.records[0].run_id, "r2");
    }

    #[tokio::test]
    async fn test_skips_bad_names_empty_and_unreadable_files() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "abc_def.csv", &three_rows());
        write_csv(dir.path(), "too_many_parts.csv", &three_rows());
        write_csv(dir.path(), "noseparator.csv", &three_rows());
        write_csv(dir.path(), "abc_empty.csv", &[]);
        write_csv(dir.path(), "abc_broken.csv", &["r1,c,yesterday,1.0,p,true,PC,false"]);

        let mut loader = Loader::new(dir.path(), CategoryNames::offline(CategoryIndex::default()));
        let datasets = loader.load().await.unwrap();

        let keys: Vec<String> = datasets.iter().map(|d| d.key().to_string()).collect();
        assert_eq!(keys, vec!["abc_def"]);
    }

    #[tokio::test]
    async fn test_missing_directory_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let mut loader = Loader::new(
            dir.path().join("absent"),
            CategoryNames::offline(CategoryIndex::default()),
        );
        assert!(loader.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_names_from_index_and_game_table() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "o1y9wo6q_wkpoo02r.csv", &three_rows());

        let mut index = CategoryIndex::default();
        index.insert(&DatasetKey::new("o1y9wo6q", "wkpoo02r"), "120 Star");

        let mut loader = Loader::new(dir.path(), CategoryNames::offline(index));
        let datasets = loader.load().await.unwrap();

        assert_eq!(datasets[0].game_name, "Super Mario 64");
        assert_eq!(datasets[0].category_name, "120 Star");
    }

    #[tokio::test]
    async fn test_live_lookup_is_cached_per_game() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/games/abc/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"id": "def", "name": "Any%"},
                    {"id": "ghi", "name": "100%"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "abc_def.csv", &three_rows());
        write_csv(dir.path(), "abc_ghi.csv", &three_rows());
        write_csv(dir.path(), "abc_zzz.csv", &three_rows());

        let client = ApiClient::new(&ApiConfig::default().with_base_url(server.uri())).unwrap();
        let mut loader = Loader::new(
            dir.path(),
            CategoryNames::with_client(CategoryIndex::default(), client),
        );
        let names: Vec<String> = loader
            .load()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.category_name)
            .collect();

        assert_eq!(names, vec!["Any%", "100%", "zzz"]);
    }

    #[tokio::test]
    async fn test_live_lookup_failure_falls_back_to_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "abc_def.csv", &three_rows());

        let client = ApiClient::new(&ApiConfig::default().with_base_url(server.uri())).unwrap();
        let mut loader = Loader::new(
            dir.path(),
            CategoryNames::with_client(CategoryIndex::default(), client),
        );
        let datasets = loader.load().await.unwrap();
        assert_eq!(datasets[0].category_name, "def");
    }

    #[tokio::test]
    async fn test_serialized_shape_is_flat() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "abc_def.csv", &three_rows());

        let mut loader = Loader::new(dir.path(), CategoryNames::offline(CategoryIndex::default()));
        let datasets = loader.load().await.unwrap();
        let json = serde_json::to_value(&datasets[0]).unwrap();

        for field in [
            "game_id",
            "game_name",
            "category_id",
            "category_name",
            "records",
            "processed_at",
            "total_runs",
            "difficulty_score",
            "platform_distribution",
        ] {
            assert!(json.get(field).is_some(), "missing {}", field);
        }
        assert!(json.get("metrics").is_none());
    }
}
