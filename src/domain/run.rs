use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LoadConfiguration, RequestOutcome};

/// Outcomes gathered for one load configuration, across all endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadRun {
    pub config: LoadConfiguration,
    pub results: Vec<RequestOutcome>,
}

/// Everything a run produced; the only persisted artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub base_url: String,
    pub timestamp: DateTime<Utc>,
    pub results: Vec<LoadRun>,
}

impl RunResult {
    #[must_use]
    pub fn new(base_url: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            base_url: base_url.into(),
            timestamp,
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, config: LoadConfiguration, results: Vec<RequestOutcome>) {
        self.results.push(LoadRun { config, results });
    }

    #[must_use]
    pub fn outcome_count(&self) -> usize {
        self.results
            .iter()
            .fold(0usize, |total, run| total.saturating_add(run.results.len()))
    }
}
