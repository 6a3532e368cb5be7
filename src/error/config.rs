use std::path::PathBuf;

use super::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported config extension '{ext}'. Use .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Config file must have .toml or .json extension.")]
    MissingExtension,
    #[error(
        "Missing authentication credentials: set an API key or all OAuth fields (missing: {missing})."
    )]
    MissingCredentials { missing: String },
    #[error("API key is not a valid header value: {source}")]
    InvalidApiKey {
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("Config '{field}' must be >= 1: {source}")]
    FieldMustBePositive {
        field: String,
        #[source]
        source: ValidationError,
    },
    #[error("Invalid duration for '{field}': {source}")]
    InvalidDuration {
        field: &'static str,
        #[source]
        source: ValidationError,
    },
    #[error("At least one endpoint must be defined.")]
    NoEndpoints,
    #[error("At least one load configuration must be defined.")]
    NoLoads,
    #[error("Endpoint and load names must not be empty.")]
    EmptyName,
    #[error("Duplicate endpoint name '{name}'.")]
    DuplicateEndpoint { name: String },
    #[error("Duplicate load configuration name '{name}'.")]
    DuplicateLoad { name: String },
    #[error("Endpoint '{name}' path '{path}' must start with '/'.")]
    InvalidEndpointPath { name: String, path: String },
    #[error("Endpoint '{endpoint}' query parameter '{key}' must be a string, number, or boolean.")]
    InvalidQueryValue { endpoint: String, key: String },
    #[error("Failed to read URL file '{path}': {source}")]
    ReadUrlFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse URL file '{path}': {source}")]
    ParseUrlFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Article URL list was empty.")]
    UrlListEmpty,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
