use std::time::Duration;

use chrono::Utc;

use super::*;
use crate::args::PositiveUsize;
use crate::domain::{ContentMetrics, LoadConfiguration, RequestOutcome, RunResult};

fn load(name: &str, concurrency: usize, repeats: usize) -> Result<LoadConfiguration, String> {
    Ok(LoadConfiguration::new(
        name,
        PositiveUsize::new(concurrency).ok_or("concurrency must be positive")?,
        PositiveUsize::new(repeats).ok_or("repeats must be positive")?,
    ))
}

fn ok(endpoint: &str, millis: u64) -> RequestOutcome {
    RequestOutcome::success(endpoint, Duration::from_millis(millis), 200, 10)
}

fn failed(endpoint: &str, millis: u64) -> RequestOutcome {
    RequestOutcome::error(endpoint, Duration::from_millis(millis), Some(500), "boom")
}

#[test]
fn steady_latency_has_zero_spread() -> Result<(), String> {
    let mut run = RunResult::new("http://localhost", Utc::now());
    run.push(load("Light", 1, 5)?, (0..5).map(|_| ok("Tags", 100)).collect());

    let table = aggregate(&run);
    let row = table.get("Light", "Tags").ok_or("missing row")?;
    if row.successes != 5 || row.errors != 0 {
        return Err(format!("Unexpected counts: {:?}", row));
    }
    let latency = row.latency.ok_or("missing latency")?;
    if latency.mean != Duration::from_millis(100) || latency.stdev != Duration::ZERO {
        return Err(format!("Unexpected latency: {:?}", latency));
    }
    if latency.min != latency.max || latency.median != latency.mean {
        return Err(format!("Unexpected spread: {:?}", latency));
    }
    Ok(())
}

#[test]
fn errors_are_excluded_from_timing() -> Result<(), String> {
    let mut run = RunResult::new("http://localhost", Utc::now());
    run.push(
        load("Medium", 3, 6)?,
        vec![
            ok("Search", 100),
            failed("Search", 5),
            ok("Search", 200),
            ok("Search", 300),
            failed("Search", 9000),
            ok("Search", 400),
        ],
    );

    let table = aggregate(&run);
    let row = table.get("Medium", "Search").ok_or("missing row")?;
    if row.successes != 4 || row.errors != 2 || row.total() != 6 {
        return Err(format!("Unexpected counts: {:?}", row));
    }
    let latency = row.latency.ok_or("missing latency")?;
    if latency.mean != Duration::from_millis(250) {
        return Err(format!("Unexpected mean: {:?}", latency.mean));
    }
    if latency.median != Duration::from_millis(250) {
        return Err(format!("Unexpected median: {:?}", latency.median));
    }
    if latency.min != Duration::from_millis(100) || latency.max != Duration::from_millis(400) {
        return Err(format!("Unexpected bounds: {:?}", latency));
    }
    // sqrt(((150^2 + 50^2) * 2) / 3) ms
    let stdev_micros = latency.stdev.as_micros();
    if !(129_099..=129_100).contains(&stdev_micros) {
        return Err(format!("Unexpected stdev: {:?}", latency.stdev));
    }
    Ok(())
}

#[test]
fn all_failures_have_no_timing_block() -> Result<(), String> {
    let mut run = RunResult::new("http://localhost", Utc::now());
    run.push(load("Heavy", 2, 2)?, vec![failed("Tags", 10), failed("Tags", 20)]);
    let table = aggregate(&run);
    let row = table.get("Heavy", "Tags").ok_or("missing row")?;
    if row.latency.is_some() || row.errors != 2 || row.successes != 0 {
        return Err(format!("Expected no timing: {:?}", row));
    }
    Ok(())
}

#[test]
fn single_success_has_zero_stdev() -> Result<(), String> {
    let stats = LatencyStats::from_samples(&[Duration::from_millis(42)]).ok_or("missing stats")?;
    if stats.stdev != Duration::ZERO || stats.median != Duration::from_millis(42) {
        return Err(format!("Unexpected stats: {:?}", stats));
    }
    if LatencyStats::from_samples(&[]).is_some() {
        return Err("Empty samples should have no stats".to_owned());
    }
    Ok(())
}

#[test]
fn odd_sample_median_is_middle_value() -> Result<(), String> {
    let samples = [
        Duration::from_millis(30),
        Duration::from_millis(10),
        Duration::from_millis(20),
    ];
    let stats = LatencyStats::from_samples(&samples).ok_or("missing stats")?;
    if stats.median != Duration::from_millis(20) || stats.stdev != Duration::from_millis(10) {
        return Err(format!("Unexpected stats: {:?}", stats));
    }
    Ok(())
}

#[test]
fn rows_follow_load_then_first_seen_endpoint_order() -> Result<(), String> {
    let mut run = RunResult::new("http://localhost", Utc::now());
    run.push(
        load("Light", 1, 2)?,
        vec![ok("Entries", 1), ok("Tags", 2), ok("Tags", 3), failed("Entries", 4)],
    );
    run.push(load("Heavy", 2, 1)?, vec![ok("Tags", 5), ok("Entries", 6)]);

    let table = aggregate(&run);
    let order: Vec<(&str, &str)> = table
        .rows()
        .iter()
        .map(|row| (row.load.as_str(), row.endpoint.as_str()))
        .collect();
    if order
        != [
            ("Light", "Entries"),
            ("Light", "Tags"),
            ("Heavy", "Tags"),
            ("Heavy", "Entries"),
        ]
    {
        return Err(format!("Unexpected order: {:?}", order));
    }
    let counted: usize = table.rows().iter().map(EndpointStatistics::total).sum();
    if counted != run.outcome_count() {
        return Err(format!("Partition lost outcomes: {} vs {}", counted, run.outcome_count()));
    }
    if table.loads() != ["Light", "Heavy"] || table.endpoints() != ["Entries", "Tags"] {
        return Err("Unexpected load or endpoint listing".to_owned());
    }
    if table.for_load("Heavy").count() != 2 {
        return Err("Expected two rows for Heavy".to_owned());
    }
    Ok(())
}

fn parsed(endpoint: &str, millis: u64, words: u64) -> RequestOutcome {
    ok(endpoint, millis).with_content(ContentMetrics {
        word_count: words,
        image_count: 0,
    })
}

#[test]
fn content_summary_averages_words_and_speed() -> Result<(), String> {
    let outcomes = [
        parsed("Parse a", 1000, 100),
        parsed("Parse b", 500, 300),
        failed("Parse c", 200),
        ok("Parse d", 100),
    ];
    let summary = summarize_content(&outcomes).ok_or("missing summary")?;
    // 100 words/s and 600 words/s.
    if summary.articles != 2 || summary.average_words != 200 || summary.words_per_second != 350 {
        return Err(format!("Unexpected summary: {:?}", summary));
    }
    Ok(())
}

#[test]
fn content_summary_needs_measured_articles() -> Result<(), String> {
    if summarize_content(&[failed("Parse a", 10), ok("Get tags", 10)]).is_some() {
        return Err("No summary expected without content metrics".to_owned());
    }
    let instant = [parsed("Parse a", 0, 40)];
    let summary = summarize_content(&instant).ok_or("missing summary")?;
    if summary.average_words != 40 || summary.words_per_second != 0 {
        return Err(format!("Zero-time article should not count toward speed: {:?}", summary));
    }
    Ok(())
}
