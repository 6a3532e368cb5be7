use std::collections::BTreeMap;
use std::error::Error as StdError;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, Request, Response, Url};
use serde_json::Value;
use tokio::time::Instant;
use tracing::debug;

use super::client::join_url;
use super::template::render_path;
use crate::args::HttpMethod;
use crate::domain::{ContentMetrics, EndpointDefinition, RequestOutcome};

/// Read-only state shared by every request of a run.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub base_url: Url,
    pub headers: HeaderMap,
    /// Path template variables, such as the seeded entry id.
    pub vars: BTreeMap<String, String>,
}

impl RequestContext {
    #[must_use]
    pub const fn new(base_url: Url, headers: HeaderMap) -> Self {
        Self {
            base_url,
            headers,
            vars: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

/// Performs one request and classifies it. Implementations never fail:
/// every problem is captured in the returned outcome.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(
        &self,
        endpoint: &EndpointDefinition,
        context: &RequestContext,
    ) -> RequestOutcome;
}

#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
}

impl HttpExecutor {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    fn build_request(
        &self,
        endpoint: &EndpointDefinition,
        context: &RequestContext,
    ) -> Result<Request, String> {
        let path = render_path(endpoint.path(), &context.vars);
        let url = join_url(&context.base_url, &path).map_err(|err| err.to_string())?;
        let builder = self
            .client
            .request(wire_method(endpoint.method()), url)
            .headers(context.headers.clone());
        let builder = if endpoint.method().sends_body() {
            let empty = Value::Object(serde_json::Map::new());
            builder.json(endpoint.body().unwrap_or(&empty))
        } else {
            builder.query(endpoint.query())
        };
        builder.build().map_err(|err| describe_error(&err))
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(
        &self,
        endpoint: &EndpointDefinition,
        context: &RequestContext,
    ) -> RequestOutcome {
        let request = match self.build_request(endpoint, context) {
            Ok(request) => request,
            Err(detail) => {
                return RequestOutcome::error(
                    endpoint.name(),
                    std::time::Duration::ZERO,
                    None,
                    detail,
                );
            }
        };

        let start = Instant::now();
        let outcome = match self.client.execute(request).await {
            Ok(response) => classify_response(endpoint, start, response).await,
            Err(err) => {
                RequestOutcome::error(endpoint.name(), start.elapsed(), None, describe_error(&err))
            }
        };
        debug!(
            "{} finished in {:?} (status {:?})",
            endpoint.name(),
            outcome.elapsed,
            outcome.status_code()
        );
        outcome
    }
}

/// `PUT` endpoints are sent as `PATCH`; the target API only accepts the latter.
const fn wire_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Patch | HttpMethod::Put => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

async fn classify_response(
    endpoint: &EndpointDefinition,
    start: Instant,
    response: Response,
) -> RequestOutcome {
    let name = endpoint.name();
    let status = response.status().as_u16();
    if status < 400 {
        return drain_response_body(response, endpoint.measures_content())
            .await
            .map_or_else(
                |err| {
                    RequestOutcome::error(name, start.elapsed(), Some(status), describe_error(&err))
                },
                |body| {
                    let mut outcome =
                        RequestOutcome::success(name, start.elapsed(), status, body.total_bytes);
                    if let Some(metrics) = body.captured.as_deref().and_then(content_metrics) {
                        outcome = outcome.with_content(metrics);
                    }
                    outcome
                },
            );
    }

    let detail = response
        .text()
        .await
        .unwrap_or_else(|err| describe_error(&err));
    RequestOutcome::error(name, start.elapsed(), Some(status), detail)
}

struct DrainedBody {
    total_bytes: u64,
    /// The full body, kept only when the caller asked for it.
    captured: Option<Vec<u8>>,
}

async fn drain_response_body(
    response: Response,
    capture: bool,
) -> Result<DrainedBody, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    let mut captured = capture.then(Vec::new);
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
        if let Some(buffer) = captured.as_mut() {
            buffer.extend_from_slice(&bytes);
        }
    }
    Ok(DrainedBody {
        total_bytes,
        captured,
    })
}

/// Metrics for a JSON object body; a missing `content` field counts as empty.
fn content_metrics(body: &[u8]) -> Option<ContentMetrics> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let object = value.as_object()?;
    let content = object.get("content").and_then(Value::as_str).unwrap_or_default();
    Some(ContentMetrics::from_content(content))
}

/// Flattens an error and its source chain into one line.
fn describe_error(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !parts.iter().any(|part| part.contains(&text)) {
            parts.push(text);
        }
        source = cause.source();
    }
    parts.join(": ")
}
