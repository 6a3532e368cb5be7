use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::args::{HttpMethod, Suite};
use crate::args::parsers::parse_duration_arg;
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

/// Contents of `archbench.toml` / `archbench.json`. Every field is optional;
/// flags given on the command line take precedence.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub suite: Option<Suite>,
    /// Article URLs for the parsing suite.
    pub urls: Option<Vec<String>>,
    pub urls_file: Option<String>,
    pub output: Option<String>,
    pub charts_path: Option<String>,
    pub no_charts: Option<bool>,
    #[serde(alias = "concurrency")]
    pub workers: Option<usize>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub fixture_url: Option<String>,
    pub endpoints: Option<Vec<EndpointConfig>>,
    pub loads: Option<Vec<LoadConfig>>,
}

/// A custom endpoint. Query keys are sent in sorted order.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    pub name: String,
    #[serde(default = "default_method")]
    pub method: HttpMethod,
    pub path: String,
    #[serde(default)]
    pub query: BTreeMap<String, Value>,
    pub body: Option<Value>,
}

const fn default_method() -> HttpMethod {
    HttpMethod::Get
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoadConfig {
    pub name: String,
    #[serde(alias = "concurrent_requests")]
    pub concurrency: usize,
    pub repeats: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    /// # Errors
    ///
    /// Returns an error when the value is zero or not a valid duration.
    pub fn to_duration(&self, field: &'static str) -> AppResult<Duration> {
        let parsed = match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_arg(text),
        };
        parsed.map_err(|err| AppError::config(ConfigError::InvalidDuration { field, source: err }))
    }
}
