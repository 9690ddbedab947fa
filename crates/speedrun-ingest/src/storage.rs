//! CSV persistence of collected datasets
//!
//! One file per (game, category), named `{game_id}_{category_id}.csv`, with
//! the [`RunRecord`] field names as header. Writes go to a temporary file in
//! the same directory that is renamed over the target, so a file on disk is
//! always either the previous dataset or the complete new one.

use crate::error::{IngestError, Result};
use speedrun_common::{DatasetKey, RunRecord};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Extension of persisted datasets
pub const DATASET_EXTENSION: &str = "csv";

pub fn dataset_file_name(key: &DatasetKey) -> String {
    key.file_name(DATASET_EXTENSION)
}

/// Write `records` to `dir`, replacing any previous dataset for `key`
///
/// Creates `dir` when missing. Returns the final path.
pub fn write_dataset(dir: &Path, key: &DatasetKey, records: &[RunRecord]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let target = dir.join(dataset_file_name(key));

    let tmp = temp_file_in(dir)?;
    let mut writer = csv::Writer::from_writer(tmp);
    for record in records {
        writer.serialize(record)?;
    }
    if records.is_empty() {
        writer.write_record(CSV_HEADER)?;
    }
    let tmp = writer
        .into_inner()
        .map_err(|e| IngestError::Io(e.into_error()))?;
    tmp.persist(&target).map_err(|e| IngestError::Io(e.error))?;

    info!(path = %target.display(), rows = records.len(), "Saved dataset");
    Ok(target)
}

/// Temporary file in `dir` that ends up `rw-r--r--` once persisted
///
/// `NamedTempFile` creates owner-only files.
pub(crate) fn temp_file_in(dir: &Path) -> Result<NamedTempFile> {
    let tmp = NamedTempFile::new_in(dir)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }
    Ok(tmp)
}

/// Header written for an empty dataset, where serde has no row to derive it from
const CSV_HEADER: [&str; 8] = [
    "run_id",
    "category",
    "date",
    "time_seconds",
    "player",
    "verified",
    "platform",
    "emulator",
];

/// Read every row of a dataset file
pub fn read_dataset(path: &Path) -> Result<Vec<RunRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let records = reader
        .deserialize::<RunRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    debug!(path = %path.display(), rows = records.len(), "Read dataset");
    Ok(records)
}

/// Dataset files directly inside `dir`, sorted by file name
///
/// A missing directory has no datasets.
pub fn list_dataset_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_dataset = path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(DATASET_EXTENSION));
        if is_dataset {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
