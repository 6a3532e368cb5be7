use super::format::{format_secs, write_grid, write_line};
use crate::domain::{LoadRun, RunResult};
use crate::error::AppResult;
use crate::metrics::{StatisticsTable, summarize_content};

const HEADERS: [&str; 8] = [
    "Endpoint", "Success", "Failed", "Avg Time", "Median", "Min", "Max", "Std Dev",
];
const NOT_APPLICABLE: &str = "N/A";

/// One titled grid per load configuration, each followed by an article
/// summary when `article_summary` is set.
pub(super) fn render_tables(
    result: &RunResult,
    table: &StatisticsTable,
    article_summary: bool,
) -> AppResult<String> {
    let mut output = String::new();
    write_line(&mut output, "")?;
    write_line(&mut output, "===== Performance Test Results =====")?;
    write_line(&mut output, &format!("Base URL: {}", result.base_url))?;
    write_line(
        &mut output,
        &format!("Timestamp: {}", result.timestamp.to_rfc3339()),
    )?;

    for run in &result.results {
        write_line(&mut output, "")?;
        write_line(
            &mut output,
            &format!(
                "{} (Concurrent Requests: {}, Repeats: {})",
                run.config.name,
                run.config.concurrency.get(),
                run.config.repeats.get()
            ),
        )?;

        let rows: Vec<Vec<String>> = table
            .for_load(&run.config.name)
            .map(|row| {
                let mut cells = vec![
                    row.endpoint.clone(),
                    row.successes.to_string(),
                    row.errors.to_string(),
                ];
                let timings: Vec<String> = row.latency.map_or_else(
                    || vec![NOT_APPLICABLE.to_owned(); 5],
                    |latency| {
                        [
                            latency.mean,
                            latency.median,
                            latency.min,
                            latency.max,
                            latency.stdev,
                        ]
                        .into_iter()
                        .map(format_secs)
                        .collect()
                    },
                );
                cells.extend(timings);
                cells
            })
            .collect();
        write_grid(&mut output, &HEADERS, &rows)?;
        if article_summary {
            write_article_summary(&mut output, run, table)?;
        }
    }
    Ok(output)
}

fn write_article_summary(output: &mut String, run: &LoadRun, table: &StatisticsTable) -> AppResult<()> {
    let (total, successes) = table
        .for_load(&run.config.name)
        .fold((0usize, 0usize), |(total, successes), row| {
            (total.saturating_add(row.total()), successes.saturating_add(row.successes))
        });
    write_line(output, "")?;
    write_line(output, &format!("Total articles tested: {}", total))?;
    write_line(output, &format!("Successful: {}", successes))?;
    write_line(output, &format!("Failed: {}", total.saturating_sub(successes)))?;

    if let Some(summary) = summarize_content(&run.results) {
        write_line(output, "")?;
        write_line(output, "--- Content Statistics ---")?;
        write_line(
            output,
            &format!("Average word count: {} words", summary.average_words),
        )?;
        write_line(
            output,
            &format!("Average parsing speed: {} words/second", summary.words_per_second),
        )?;
    }

    let failures: Vec<(&str, &str)> = run
        .results
        .iter()
        .filter_map(|outcome| Some((outcome.endpoint.as_str(), outcome.error_detail()?)))
        .collect();
    if !failures.is_empty() {
        write_line(output, "")?;
        write_line(output, "--- Failed Articles ---")?;
        for (label, detail) in failures {
            write_line(output, &format!("{} - Error: {}", label, detail))?;
        }
    }
    Ok(())
}
