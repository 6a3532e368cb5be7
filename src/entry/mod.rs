mod plan;

use std::ffi::OsString;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::error;

use crate::args::BenchArgs;
use crate::error::AppResult;
use plan::{build_plan, execute_plan};

/// Binary entry point: parses arguments, sets up logging and the runtime,
/// then runs the benchmark.
///
/// # Errors
///
/// Returns any setup or report failure; the process exits non-zero.
pub fn run() -> AppResult<()> {
    let (args, matches) = parse_args()?;

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(run_async(args, &matches));
    if let Err(err) = result.as_ref() {
        error!("Benchmark aborted: {}", err);
    }
    result
}

fn parse_args() -> AppResult<(BenchArgs, ArgMatches)> {
    let raw_args: Vec<OsString> = std::env::args_os().collect();
    let matches = BenchArgs::command().get_matches_from(raw_args);
    let args = BenchArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

async fn run_async(args: BenchArgs, matches: &ArgMatches) -> AppResult<()> {
    let plan = build_plan(args, matches)?;
    execute_plan(plan).await
}
