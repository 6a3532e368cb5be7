use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::apply::ensure_positive_usize;
use super::types::{ConfigFile, EndpointConfig, LoadConfig};
use crate::app::HarnessConfig;
use crate::args::{BenchArgs, DEFAULT_PARSING_WORKERS, PositiveUsize, Suite};
use crate::domain::EndpointDefinition;
use crate::domain::LoadConfiguration;
use crate::domain::suites::{
    DEFAULT_ARTICLE_URLS, FIXTURE_URL, api_endpoints, api_loads, parsing_endpoints, parsing_loads,
};
use crate::error::{AppError, AppResult, ConfigError};
use crate::http::{Credentials, parse_base_url};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UrlFile {
    List(Vec<String>),
    Wrapped { urls: Vec<String> },
}

/// Reads article URLs from a JSON list or an object with a `urls` list.
///
/// # Errors
///
/// Returns an error when the file cannot be read, is not one of the two
/// accepted shapes, or holds no URLs.
pub fn load_url_file(path: &Path) -> AppResult<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadUrlFile {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    let parsed: UrlFile = serde_json::from_str(&content).map_err(|err| {
        AppError::config(ConfigError::ParseUrlFile {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    let urls = match parsed {
        UrlFile::List(urls) | UrlFile::Wrapped { urls } => urls,
    };
    non_empty_urls(urls)
}

fn non_empty_urls(urls: Vec<String>) -> AppResult<Vec<String>> {
    let urls: Vec<String> = urls
        .into_iter()
        .map(|url| url.trim().to_owned())
        .filter(|url| !url.is_empty())
        .collect();
    if urls.is_empty() {
        return Err(AppError::config(ConfigError::UrlListEmpty));
    }
    Ok(urls)
}

/// Resolves CLI arguments and the optional config file into the inputs of
/// one run.
///
/// # Errors
///
/// Returns an error for an invalid base URL, unreadable URL file, or invalid
/// endpoint and load definitions.
pub fn build_harness(args: &BenchArgs, config: Option<&ConfigFile>) -> AppResult<HarnessConfig> {
    let base_url = parse_base_url(&args.base_url)?;
    let credentials = Credentials {
        api_key: args.api_key.clone(),
        client_id: args.client_id.clone(),
        client_secret: args.client_secret.clone(),
        username: args.username.clone(),
        password: args.password.clone(),
    };

    let custom_endpoints = config.and_then(|config| config.endpoints.as_ref());
    let endpoints = match (custom_endpoints, args.suite) {
        (Some(custom), _) => custom
            .iter()
            .map(endpoint_from_config)
            .collect::<AppResult<Vec<_>>>()?,
        (None, Suite::Api) => api_endpoints(),
        (None, Suite::Parsing) => parsing_endpoints(&article_urls(args, config)?),
    };

    let custom_loads = config.and_then(|config| config.loads.as_ref());
    let loads = match (custom_loads, args.suite) {
        (Some(custom), _) => override_concurrency(
            custom
                .iter()
                .map(load_from_config)
                .collect::<AppResult<Vec<_>>>()?,
            args.workers,
        ),
        (None, Suite::Api) => override_concurrency(api_loads(), args.workers),
        (None, Suite::Parsing) => {
            let workers = args
                .workers
                .or_else(|| PositiveUsize::new(DEFAULT_PARSING_WORKERS))
                .unwrap_or(PositiveUsize::ONE);
            let slots = endpoints
                .iter()
                .map(|endpoint| endpoint.variants().len())
                .max()
                .unwrap_or(0);
            parsing_loads(workers, slots)
        }
    };

    let fixture_url = config
        .and_then(|config| config.fixture_url.clone())
        .unwrap_or_else(|| FIXTURE_URL.to_owned());

    info!(
        "Benchmarking {} with the {} suite ({} endpoints, {} load levels)",
        base_url,
        args.suite.as_str(),
        endpoints.len(),
        loads.len()
    );

    Ok(HarnessConfig {
        base_url,
        credentials,
        endpoints,
        loads,
        fixture_url,
        request_timeout: args.request_timeout,
        connect_timeout: args.connect_timeout,
    })
}

fn article_urls(args: &BenchArgs, config: Option<&ConfigFile>) -> AppResult<Vec<String>> {
    if let Some(path) = args.urls_file.as_deref() {
        let urls = load_url_file(Path::new(path))?;
        info!("Loaded {} article URLs from {}", urls.len(), path);
        return Ok(urls);
    }
    if let Some(urls) = config.and_then(|config| config.urls.clone()) {
        return non_empty_urls(urls);
    }
    Ok(DEFAULT_ARTICLE_URLS.iter().map(|url| (*url).to_owned()).collect())
}

fn override_concurrency(
    loads: Vec<LoadConfiguration>,
    workers: Option<PositiveUsize>,
) -> Vec<LoadConfiguration> {
    let Some(workers) = workers else {
        return loads;
    };
    loads
        .into_iter()
        .map(|load| load.with_concurrency(workers))
        .collect()
}

fn endpoint_from_config(config: &EndpointConfig) -> AppResult<EndpointDefinition> {
    let mut endpoint = EndpointDefinition::new(config.name.clone(), config.method, config.path.clone());
    for (key, value) in &config.query {
        let rendered = match value {
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                return Err(AppError::config(ConfigError::InvalidQueryValue {
                    endpoint: config.name.clone(),
                    key: key.clone(),
                }));
            }
        };
        endpoint = endpoint.with_query(key.clone(), rendered);
    }
    if let Some(body) = config.body.clone() {
        endpoint = endpoint.with_body(body);
    }
    Ok(endpoint)
}

fn load_from_config(config: &LoadConfig) -> AppResult<LoadConfiguration> {
    let concurrency =
        ensure_positive_usize(config.concurrency, &format!("loads.{}.concurrency", config.name))?;
    let repeats = ensure_positive_usize(config.repeats, &format!("loads.{}.repeats", config.name))?;
    Ok(LoadConfiguration::new(config.name.clone(), concurrency, repeats))
}
