//! `speedrun dashboard` command implementation
//!
//! Loads every dataset of the data directory and prints it as tables or JSON.

use crate::config::Config;
use crate::dashboard::{render_dataset, render_overview, select, DatasetView};
use crate::error::{CliError, Result};
use crate::loader::{CategoryNames, LoadedDataset, Loader};
use crate::progress::create_spinner;
use crate::{DashboardArgs, OutputFormat};
use speedrun_ingest::{ApiClient, CategoryIndex};
use tracing::warn;

/// Load the data directory and print the dashboard
pub async fn run(config: &Config, args: &DashboardArgs) -> Result<()> {
    let datasets = load(config, args.offline).await?;
    let selected = select(&datasets, args.select.as_deref())?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&selected)?);
        },
        OutputFormat::Table => {
            print!("{}", render_overview(&datasets));
            for dataset in selected {
                print!("{}", render_dataset(&DatasetView::build(dataset, args.top)));
            }
        },
    }

    Ok(())
}

/// Load every dataset, failing with [`CliError::NoData`] when none is usable
pub async fn load(config: &Config, offline: bool) -> Result<Vec<LoadedDataset>> {
    let index = CategoryIndex::load(&config.data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "Category index unreadable, ignoring it");
        CategoryIndex::default()
    });

    let names = if offline {
        CategoryNames::offline(index)
    } else {
        CategoryNames::with_client(index, ApiClient::new(&config.api)?)
    };

    let spinner = create_spinner("Loading datasets...");
    let datasets = Loader::new(&config.data_dir, names).load().await;
    spinner.finish_and_clear();
    let datasets = datasets?;

    if datasets.is_empty() {
        return Err(CliError::no_data(&config.data_dir));
    }
    Ok(datasets)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use speedrun_ingest::ApiConfig;
    use tempfile::TempDir;

    fn config_for(dir: &TempDir) -> Config {
        Config {
            data_dir: dir.path().to_path_buf(),
            api: ApiConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_empty_directory_is_no_data() {
        let dir = TempDir::new().unwrap();
        let err = load(&config_for(&dir), true).await.unwrap_err();
        assert!(matches!(err, CliError::NoData(_)));
    }

    #[tokio::test]
    async fn test_load_offline() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("abc_def.csv"),
            "run_id,category,date,time_seconds,player,verified,platform,emulator\n\
             r1,def,2020-01-01,10.0,p,true,PC,false\n",
        )
        .unwrap();

        let datasets = load(&config_for(&dir), true).await.unwrap();
        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0].metrics.total_runs, 1);
    }
}
