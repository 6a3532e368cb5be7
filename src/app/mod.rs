//! Run orchestration: credentials, fixture, and load-by-load dispatch.
mod dispatch;
mod runner;


use std::path::Path;

use tracing::info;

use crate::domain::RunResult;
use crate::error::AppResult;
use crate::sinks::ReportSink;

pub use dispatch::dispatch;
pub use runner::{HarnessConfig, Orchestrator};

/// Runs the benchmark, then renders and persists the result.
///
/// Nothing is rendered or written when the run fails during setup.
///
/// # Errors
///
/// Returns setup failures from the orchestrator and report write failures
/// from the sink.
pub async fn run_and_report(
    orchestrator: &Orchestrator,
    sink: &dyn ReportSink,
    output: &Path,
) -> AppResult<RunResult> {
    let result = orchestrator.run().await?;
    sink.render(&result).await?;
    sink.persist(&result, output).await?;
    info!("Results saved to {}", output.display());
    Ok(result)
}
