//! Per-(load, endpoint) latency statistics and article content summaries.
mod content;
mod stats;

#[cfg(test)]
mod tests;

pub use content::{ContentSummary, summarize_content};
pub use stats::{EndpointStatistics, LatencyStats, StatisticsTable, aggregate};
