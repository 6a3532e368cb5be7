use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::args::PositiveUsize;
use crate::error::{AppError, AppResult, ConfigError};

/// One level of load: `repeats` requests per endpoint, at most `concurrency` in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadConfiguration {
    pub name: String,
    #[serde(rename = "concurrent_requests")]
    pub concurrency: PositiveUsize,
    pub repeats: PositiveUsize,
}

impl LoadConfiguration {
    #[must_use]
    pub fn new(name: impl Into<String>, concurrency: PositiveUsize, repeats: PositiveUsize) -> Self {
        Self {
            name: name.into(),
            concurrency,
            repeats,
        }
    }

    #[must_use]
    pub fn with_concurrency(mut self, concurrency: PositiveUsize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Number of workers a dispatcher needs for this load.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.concurrency.min(self.repeats).get()
    }
}

/// Checks that at least one load exists and names are unique.
///
/// # Errors
///
/// Returns a configuration error for an empty set, blank name, or duplicate.
pub fn validate_loads(loads: &[LoadConfiguration]) -> AppResult<()> {
    if loads.is_empty() {
        return Err(AppError::config(ConfigError::NoLoads));
    }
    let mut seen = HashSet::new();
    for load in loads {
        if load.name.trim().is_empty() {
            return Err(AppError::config(ConfigError::EmptyName));
        }
        if !seen.insert(load.name.as_str()) {
            return Err(AppError::config(ConfigError::DuplicateLoad {
                name: load.name.clone(),
            }));
        }
    }
    Ok(())
}
