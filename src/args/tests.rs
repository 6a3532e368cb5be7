use std::time::Duration;

use clap::Parser;

use super::parsers::parse_duration_arg;
use super::{BenchArgs, PositiveUsize, Suite};

fn parse(args: &[&str]) -> Result<BenchArgs, String> {
    let mut argv = vec!["archbench"];
    argv.extend_from_slice(args);
    BenchArgs::try_parse_from(argv).map_err(|err| err.to_string())
}

#[test]
fn defaults_target_local_api_suite() -> Result<(), String> {
    let args = parse(&[])?;
    if args.suite != Suite::Api {
        return Err(format!("Unexpected suite: {:?}", args.suite));
    }
    if args.report_path() != "api_performance_results.json" {
        return Err(format!("Unexpected report path: {}", args.report_path()));
    }
    if args.charts_path != "performance_charts" {
        return Err(format!("Unexpected charts path: {}", args.charts_path));
    }
    if args.request_timeout != Duration::from_secs(30) {
        return Err("Unexpected request timeout".to_owned());
    }
    if args.workers.is_some() {
        return Err("Workers should not be set by default".to_owned());
    }
    Ok(())
}

#[test]
fn parsing_suite_uses_its_own_report_name() -> Result<(), String> {
    let args = parse(&["--suite", "parsing"])?;
    if args.report_path() != "performance_results.json" {
        return Err(format!("Unexpected report path: {}", args.report_path()));
    }
    let explicit = parse(&["--suite", "parsing", "-o", "out.json"])?;
    if explicit.report_path() != "out.json" {
        return Err(format!("Unexpected report path: {}", explicit.report_path()));
    }
    Ok(())
}

#[test]
fn workers_must_be_positive() -> Result<(), String> {
    if parse(&["--workers", "0"]).is_ok() {
        return Err("Expected --workers 0 to be rejected".to_owned());
    }
    let args = parse(&["-w", "7"])?;
    if args.workers != PositiveUsize::new(7) {
        return Err(format!("Unexpected workers: {:?}", args.workers));
    }
    Ok(())
}

#[test]
fn credentials_parse_from_flags() -> Result<(), String> {
    let args = parse(&[
        "--api-key",
        "secret",
        "--client-id",
        "id",
        "--client-secret",
        "shh",
        "--username",
        "reader",
        "--password",
        "pw",
    ])?;
    if args.api_key.as_deref() != Some("secret") {
        return Err("Missing api key".to_owned());
    }
    if args.client_id.as_deref() != Some("id") || args.username.as_deref() != Some("reader") {
        return Err("Missing OAuth fields".to_owned());
    }
    Ok(())
}

#[test]
fn duration_units_parse() -> Result<(), String> {
    let cases = [
        ("250ms", Duration::from_millis(250)),
        ("5", Duration::from_secs(5)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3600)),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration_arg(input).map_err(|err| err.to_string())?;
        if parsed != expected {
            return Err(format!("{} parsed as {:?}", input, parsed));
        }
    }
    for invalid in ["", "ms", "0s", "10d"] {
        if parse_duration_arg(invalid).is_ok() {
            return Err(format!("Expected '{}' to be rejected", invalid));
        }
    }
    Ok(())
}
