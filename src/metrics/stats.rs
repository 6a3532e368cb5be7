use std::collections::HashMap;
use std::time::Duration;

use crate::domain::{RequestOutcome, RunResult};

/// Timing over the successful requests of one pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyStats {
    pub mean: Duration,
    pub median: Duration,
    pub min: Duration,
    pub max: Duration,
    /// Sample standard deviation; zero with fewer than two samples.
    pub stdev: Duration,
}

impl LatencyStats {
    /// Returns `None` for an empty sample set.
    #[must_use]
    pub fn from_samples(samples: &[Duration]) -> Option<Self> {
        let mut nanos: Vec<u128> = samples.iter().map(Duration::as_nanos).collect();
        nanos.sort_unstable();

        let count = u128::try_from(nanos.len()).ok()?;
        let min = *nanos.first()?;
        let max = *nanos.last()?;
        let sum = nanos
            .iter()
            .try_fold(0u128, |acc, value| acc.checked_add(*value))?;
        let mean = sum.checked_div(count)?;
        let median = median_of_sorted(&nanos)?;
        let stdev = sample_stdev(&nanos, mean, count);

        Some(Self {
            mean: nanos_to_duration(mean),
            median: nanos_to_duration(median),
            min: nanos_to_duration(min),
            max: nanos_to_duration(max),
            stdev: nanos_to_duration(stdev),
        })
    }
}

fn median_of_sorted(sorted: &[u128]) -> Option<u128> {
    let mid = sorted.len().checked_div(2)?;
    if sorted.len().checked_rem(2)? == 1 {
        return sorted.get(mid).copied();
    }
    let lower = *sorted.get(mid.checked_sub(1)?)?;
    let upper = *sorted.get(mid)?;
    lower.checked_add(upper)?.checked_div(2)
}

fn sample_stdev(samples: &[u128], mean: u128, count: u128) -> u128 {
    let Some(denominator) = count.checked_sub(1).filter(|value| *value > 0) else {
        return 0;
    };
    let squares = samples.iter().try_fold(0u128, |acc, value| {
        let deviation = value.abs_diff(mean);
        acc.checked_add(deviation.checked_mul(deviation)?)
    });
    squares
        .and_then(|sum| sum.checked_div(denominator))
        .map_or(u128::MAX, u128::isqrt)
}

fn nanos_to_duration(nanos: u128) -> Duration {
    u64::try_from(nanos).map_or(Duration::MAX, Duration::from_nanos)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointStatistics {
    pub load: String,
    pub endpoint: String,
    pub successes: usize,
    pub errors: usize,
    /// Absent when no request succeeded.
    pub latency: Option<LatencyStats>,
}

impl EndpointStatistics {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.successes.saturating_add(self.errors)
    }
}

/// Statistics rows in load order, then first-seen endpoint order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatisticsTable {
    rows: Vec<EndpointStatistics>,
}

impl StatisticsTable {
    #[must_use]
    pub fn rows(&self) -> &[EndpointStatistics] {
        &self.rows
    }

    #[must_use]
    pub fn get(&self, load: &str, endpoint: &str) -> Option<&EndpointStatistics> {
        self.rows
            .iter()
            .find(|row| row.load == load && row.endpoint == endpoint)
    }

    pub fn for_load<'table>(
        &'table self,
        load: &'table str,
    ) -> impl Iterator<Item = &'table EndpointStatistics> {
        self.rows.iter().filter(move |row| row.load == load)
    }

    /// Endpoint names in first-seen order across all loads.
    #[must_use]
    pub fn endpoints(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !names.contains(&row.endpoint.as_str()) {
                names.push(&row.endpoint);
            }
        }
        names
    }

    /// Load names in run order.
    #[must_use]
    pub fn loads(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !names.contains(&row.load.as_str()) {
                names.push(&row.load);
            }
        }
        names
    }
}

/// Reduces a run into one statistics row per (load, endpoint) pairing.
#[must_use]
pub fn aggregate(result: &RunResult) -> StatisticsTable {
    let mut rows = Vec::new();
    for run in &result.results {
        let mut order: Vec<&str> = Vec::new();
        let mut groups: HashMap<&str, Vec<&RequestOutcome>> = HashMap::new();
        for outcome in &run.results {
            let name = outcome.endpoint.as_str();
            let group = groups.entry(name).or_insert_with(|| {
                order.push(name);
                Vec::new()
            });
            group.push(outcome);
        }

        for name in order {
            let outcomes = groups.remove(name).unwrap_or_default();
            let samples: Vec<Duration> = outcomes
                .iter()
                .filter(|outcome| outcome.is_success())
                .map(|outcome| outcome.elapsed)
                .collect();
            let successes = samples.len();
            rows.push(EndpointStatistics {
                load: run.config.name.clone(),
                endpoint: name.to_owned(),
                successes,
                errors: outcomes.len().saturating_sub(successes),
                latency: LatencyStats::from_samples(&samples),
            });
        }
    }
    StatisticsTable { rows }
}
