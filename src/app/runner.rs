use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, Url};
use tracing::{debug, info};

use super::dispatch::dispatch;
use crate::domain::suites::ENTRY_ID_PLACEHOLDER;
use crate::domain::{
    EndpointDefinition, LoadConfiguration, RunResult, validate_endpoints, validate_loads,
};
use crate::error::AppResult;
use crate::http::{
    Credentials, HttpExecutor, RequestContext, RequestExecutor, build_client,
    resolve_auth_headers, seed_entry,
};

/// Fully resolved inputs for one run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub base_url: Url,
    pub credentials: Credentials,
    pub endpoints: Vec<EndpointDefinition>,
    pub loads: Vec<LoadConfiguration>,
    pub fixture_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

pub struct Orchestrator {
    config: HarnessConfig,
    client: Client,
    executor: Arc<dyn RequestExecutor>,
}

impl Orchestrator {
    /// # Errors
    ///
    /// Returns an error when the endpoint or load sets are invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: HarnessConfig) -> AppResult<Self> {
        validate_endpoints(&config.endpoints)?;
        validate_loads(&config.loads)?;
        let client = build_client(config.request_timeout, config.connect_timeout)?;
        let executor: Arc<dyn RequestExecutor> = Arc::new(HttpExecutor::new(client.clone()));
        Ok(Self {
            config,
            client,
            executor,
        })
    }

    /// Replaces the measurement executor; setup calls still use HTTP.
    #[must_use]
    pub fn with_executor(mut self, executor: Arc<dyn RequestExecutor>) -> Self {
        self.executor = executor;
        self
    }

    /// Authenticates, seeds the fixture when needed, then runs every load
    /// against every endpoint in declared order.
    ///
    /// # Errors
    ///
    /// Returns configuration, authentication, or fixture errors before any
    /// measurement starts. Failed measurement requests are recorded, not
    /// returned.
    pub async fn run(&self) -> AppResult<RunResult> {
        let base_url = &self.config.base_url;
        let headers = resolve_auth_headers(&self.client, base_url, &self.config.credentials).await?;
        let mut context = RequestContext::new(base_url.clone(), headers);

        let needs_fixture = self
            .config
            .endpoints
            .iter()
            .any(|endpoint| endpoint.uses_placeholder(ENTRY_ID_PLACEHOLDER));
        if needs_fixture {
            let entry_id = seed_entry(
                &self.client,
                base_url,
                &context.headers,
                &self.config.fixture_url,
            )
            .await?;
            context = context.with_var(ENTRY_ID_PLACEHOLDER, entry_id);
        }
        let context = Arc::new(context);
        let endpoints: Vec<Arc<EndpointDefinition>> = self
            .config
            .endpoints
            .iter()
            .cloned()
            .map(Arc::new)
            .collect();

        let mut result = RunResult::new(base_url.as_str().trim_end_matches('/'), Utc::now());
        for load in &self.config.loads {
            info!(
                "Running {} ({} concurrent, {} repeats per endpoint)",
                load.name,
                load.concurrency.get(),
                load.repeats.get()
            );
            let mut outcomes =
                Vec::with_capacity(endpoints.len().saturating_mul(load.repeats.get()));
            for endpoint in &endpoints {
                debug!("Testing {} {}", endpoint.method().as_str(), endpoint.name());
                let batch = dispatch(&self.executor, &context, endpoint, load).await?;
                outcomes.extend(batch);
            }
            result.push(load.clone(), outcomes);
        }
        Ok(result)
    }
}
