use std::time::Duration;

use reqwest::{Client, Url};

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, HttpError};

/// Builds the shared client used for setup and measurement requests.
///
/// # Errors
///
/// Returns an error when the underlying TLS/connector setup fails.
pub fn build_client(request_timeout: Duration, connect_timeout: Duration) -> AppResult<Client> {
    Client::builder()
        .timeout(request_timeout)
        .connect_timeout(connect_timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}

/// # Errors
///
/// Returns an error when `raw` is not an absolute URL.
pub fn parse_base_url(raw: &str) -> AppResult<Url> {
    Url::parse(raw.trim()).map_err(|err| {
        AppError::http(HttpError::InvalidBaseUrl {
            url: raw.to_owned(),
            source: err,
        })
    })
}

/// Appends `path` to the base URL, keeping any path prefix the base carries.
///
/// # Errors
///
/// Returns an error when the combined URL cannot be parsed.
pub fn join_url(base: &Url, path: &str) -> AppResult<Url> {
    let prefix = base.path().trim_end_matches('/');
    let relative = path.trim_start_matches('/');
    let combined = format!("{}/{}", prefix, relative);
    base.join(&combined).map_err(|err| {
        AppError::http(HttpError::JoinUrlFailed {
            path: path.to_owned(),
            source: err,
        })
    })
}
