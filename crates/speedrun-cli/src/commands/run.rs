//! `speedrun run` command implementation
//!
//! Collect, then show the dashboard over whatever the data directory holds.
//! With JSON output the collection summary goes to stderr so stdout holds
//! only the JSON document.

use crate::config::Config;
use crate::error::Result;
use crate::{CollectArgs, DashboardArgs, OutputFormat};
use tracing::warn;

pub async fn run(config: &Config, collect: &CollectArgs, dashboard: &DashboardArgs) -> Result<()> {
    let (summary, effective) = super::collect::collect(config, collect).await?;
    let report = super::collect::format_summary(&summary, &effective);
    match dashboard.format {
        OutputFormat::Json => eprint!("{}", report),
        OutputFormat::Table => println!("{}", report),
    }

    if summary.is_empty() {
        warn!("Collection saved no datasets, showing previously collected data");
    }
    super::dashboard::run(config, dashboard).await
}
