use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{BenchArgs, PositiveUsize};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Copies config file values into `args` wherever the flag was not given
/// on the command line.
///
/// # Errors
///
/// Returns an error when a config value is out of range.
pub fn apply_config(args: &mut BenchArgs, matches: &ArgMatches, config: &ConfigFile) -> AppResult<()> {
    if !is_cli(matches, "base_url")
        && let Some(base_url) = config.base_url.clone()
    {
        args.base_url = base_url;
    }

    apply_secret(&mut args.api_key, matches, "api_key", config.api_key.as_ref());
    apply_secret(&mut args.client_id, matches, "client_id", config.client_id.as_ref());
    apply_secret(
        &mut args.client_secret,
        matches,
        "client_secret",
        config.client_secret.as_ref(),
    );
    apply_secret(&mut args.username, matches, "username", config.username.as_ref());
    apply_secret(&mut args.password, matches, "password", config.password.as_ref());

    if !is_cli(matches, "suite")
        && let Some(suite) = config.suite
    {
        args.suite = suite;
    }

    if !is_cli(matches, "urls_file")
        && let Some(urls_file) = config.urls_file.clone()
    {
        args.urls_file = Some(urls_file);
    }

    if !is_cli(matches, "output")
        && let Some(output) = config.output.clone()
    {
        args.output = Some(output);
    }

    if !is_cli(matches, "charts_path")
        && let Some(charts_path) = config.charts_path.clone()
    {
        args.charts_path = charts_path;
    }

    if !is_cli(matches, "no_charts")
        && let Some(no_charts) = config.no_charts
    {
        args.no_charts = no_charts;
    }

    if !is_cli(matches, "workers")
        && let Some(workers) = config.workers
    {
        args.workers = Some(ensure_positive_usize(workers, "workers")?);
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = timeout.to_duration("timeout")?;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = timeout.to_duration("connect_timeout")?;
    }

    Ok(())
}

fn apply_secret(
    target: &mut Option<String>,
    matches: &ArgMatches,
    name: &str,
    value: Option<&String>,
) {
    if !is_cli(matches, name)
        && let Some(value) = value
    {
        *target = Some(value.clone());
    }
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

pub(super) fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}
