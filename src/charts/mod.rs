//! Per-endpoint latency bar charts.
mod latency;
mod naming;


use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{error, info};

use crate::error::{AppError, AppResult, SinkError};
use crate::metrics::StatisticsTable;

pub use latency::{ChartBar, plot_mean_latency};
pub use naming::chart_file_name;

/// Bars for one endpoint across every load, in run order.
#[must_use]
pub fn chart_bars(table: &StatisticsTable, endpoint: &str) -> Vec<ChartBar> {
    table
        .loads()
        .into_iter()
        .map(|load| ChartBar {
            label: load.to_owned(),
            mean_ms: table
                .get(load, endpoint)
                .and_then(|row| row.latency)
                .map(|latency| u64::try_from(latency.mean.as_millis()).unwrap_or(u64::MAX)),
        })
        .collect()
}

/// Writes one chart per endpoint (sorted by name) into `charts_dir`.
///
/// A chart that fails to render is logged and skipped.
///
/// # Errors
///
/// Returns an error when the directory cannot be created or a chart path is
/// not valid UTF-8.
pub async fn plot_endpoint_charts(
    table: &StatisticsTable,
    charts_dir: &Path,
) -> AppResult<Vec<PathBuf>> {
    fs::create_dir_all(charts_dir).await.map_err(|err| {
        AppError::sink(SinkError::CreateChartsDir {
            path: charts_dir.to_path_buf(),
            source: err,
        })
    })?;

    let mut endpoints = table.endpoints();
    endpoints.sort_unstable();

    let mut written = Vec::with_capacity(endpoints.len());
    for endpoint in endpoints {
        let path = charts_dir.join(chart_file_name(endpoint));
        let path_str = path.to_str().ok_or_else(|| {
            AppError::sink(SinkError::ChartPath {
                path: path.clone(),
            })
        })?;
        let bars = chart_bars(table, endpoint);
        match plot_mean_latency(endpoint, &bars, path_str) {
            Ok(()) => written.push(path),
            Err(err) => error!("Failed to plot chart for {}: {}", endpoint, err),
        }
    }
    info!("Charts saved in {}", charts_dir.display());
    Ok(written)
}
