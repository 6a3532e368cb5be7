use std::path::PathBuf;

use clap::ArgMatches;
use tracing::info;

use crate::app::{HarnessConfig, Orchestrator, run_and_report};
use crate::args::{BenchArgs, Suite};
use crate::config::{apply_config, build_harness, load_config};
use crate::error::AppResult;
use crate::sinks::StandardReport;

pub(super) struct RunPlan {
    harness: HarnessConfig,
    report_path: PathBuf,
    charts_dir: Option<PathBuf>,
    article_summary: bool,
}

pub(super) fn build_plan(mut args: BenchArgs, matches: &ArgMatches) -> AppResult<RunPlan> {
    let config = load_config(args.config.as_deref())?;
    if let Some(config) = config.as_ref() {
        apply_config(&mut args, matches, config)?;
    }

    let harness = build_harness(&args, config.as_ref())?;
    let charts_dir = if args.no_charts {
        None
    } else {
        Some(PathBuf::from(&args.charts_path))
    };
    Ok(RunPlan {
        harness,
        report_path: PathBuf::from(args.report_path()),
        charts_dir,
        article_summary: args.suite == Suite::Parsing,
    })
}

pub(super) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    let orchestrator = Orchestrator::new(plan.harness)?;
    let mut sink = StandardReport::new(plan.charts_dir);
    if plan.article_summary {
        sink = sink.with_article_summary();
    }
    let result = run_and_report(&orchestrator, &sink, &plan.report_path).await?;
    info!(
        "Benchmark finished: {} requests across {} load levels",
        result.outcome_count(),
        result.results.len()
    );
    Ok(())
}
