//! Report output: terminal tables, the JSON report, and charts.
mod format;
mod json;
mod table;


use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::error;

use crate::charts::plot_endpoint_charts;
use crate::domain::RunResult;
use crate::error::AppResult;
use crate::metrics::aggregate;

pub use json::read_report;

#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Presents the result to the user.
    async fn render(&self, result: &RunResult) -> AppResult<()>;

    /// Stores the result at `path`.
    async fn persist(&self, result: &RunResult, path: &Path) -> AppResult<()>;
}

/// Prints statistics tables to stdout, writes the JSON report, and
/// optionally plots charts.
#[derive(Debug, Clone, Default)]
pub struct StandardReport {
    charts_dir: Option<PathBuf>,
    article_summary: bool,
}

impl StandardReport {
    #[must_use]
    pub const fn new(charts_dir: Option<PathBuf>) -> Self {
        Self {
            charts_dir,
            article_summary: false,
        }
    }

    /// Adds article totals, content statistics and failed submissions below
    /// each table.
    #[must_use]
    pub const fn with_article_summary(mut self) -> Self {
        self.article_summary = true;
        self
    }
}

#[async_trait]
impl ReportSink for StandardReport {
    async fn render(&self, result: &RunResult) -> AppResult<()> {
        let table = aggregate(result);
        let output = table::render_tables(result, &table, self.article_summary)?;
        print!("{}", output);

        if let Some(dir) = self.charts_dir.as_ref()
            && let Err(err) = plot_endpoint_charts(&table, dir).await
        {
            error!("Failed to generate charts: {}", err);
        }
        Ok(())
    }

    async fn persist(&self, result: &RunResult, path: &Path) -> AppResult<()> {
        json::write_report(result, path).await
    }
}
