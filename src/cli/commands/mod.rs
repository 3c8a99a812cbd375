//! CLI command implementations.

pub mod backtest;
pub mod signals;
pub mod validate;

use anyhow::{bail, Context, Result};
use futures::future::try_join_all;
use macd_core::types::PriceSeries;
use macd_data::{load_csv, PriceField};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Files named on the command line, or the configured list when none are.
pub(crate) fn resolve_files(cli_files: &[PathBuf], configured: &[String]) -> Result<Vec<PathBuf>> {
    let files: Vec<PathBuf> = if cli_files.is_empty() {
        configured.iter().map(PathBuf::from).collect()
    } else {
        cli_files.to_vec()
    };

    if files.is_empty() {
        bail!("No data files given. Pass --data FILE or set data.files in the configuration");
    }
    Ok(files)
}

/// Load each file and run `job` on it, one blocking task per file.
///
/// Results come back in input order. The first failure aborts the command.
pub(crate) async fn run_per_file<T, F>(
    files: Vec<PathBuf>,
    field: PriceField,
    job: F,
) -> Result<Vec<T>>
where
    T: Send + 'static,
    F: Fn(PriceSeries) -> Result<T> + Send + Sync + 'static,
{
    info!(files = files.len(), ?field, "Processing price histories");

    let job = Arc::new(job);
    let tasks = files.into_iter().map(|path| {
        let job = Arc::clone(&job);
        tokio::task::spawn_blocking(move || {
            let series = load_csv(&path, field)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            job(series)
        })
    });

    try_join_all(tasks).await?.into_iter().collect()
}
