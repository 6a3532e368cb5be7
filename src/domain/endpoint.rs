use std::borrow::Cow;
use std::collections::HashSet;

use serde_json::Value;

use crate::args::HttpMethod;
use crate::error::{AppError, AppResult, ConfigError};

/// Ordered query parameters; order is preserved on the wire.
pub type QueryParams = Vec<(String, String)>;

/// A labelled body sent in place of the endpoint's own for one request slot.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestVariant {
    pub label: String,
    pub body: Value,
}

impl RequestVariant {
    #[must_use]
    pub fn new(label: impl Into<String>, body: Value) -> Self {
        Self {
            label: label.into(),
            body,
        }
    }
}

/// A single request template in a benchmark suite.
///
/// An endpoint with variants spreads its request slots over them in order,
/// and each outcome carries the variant's label instead of the endpoint name.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointDefinition {
    name: String,
    method: HttpMethod,
    path: String,
    query: QueryParams,
    body: Option<Value>,
    variants: Vec<RequestVariant>,
    measures_content: bool,
}

impl EndpointDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            variants: Vec::new(),
            measures_content: false,
        }
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_variants(mut self, variants: Vec<RequestVariant>) -> Self {
        self.variants = variants;
        self
    }

    /// Successful responses are inspected for article content statistics.
    #[must_use]
    pub const fn measuring_content(mut self) -> Self {
        self.measures_content = true;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    #[must_use]
    pub fn variants(&self) -> &[RequestVariant] {
        &self.variants
    }

    #[must_use]
    pub const fn measures_content(&self) -> bool {
        self.measures_content
    }

    /// The request sent for dispatch slot `slot`; variants repeat when there
    /// are more slots than variants.
    #[must_use]
    pub fn for_slot(&self, slot: usize) -> Cow<'_, Self> {
        let variant = slot
            .checked_rem(self.variants.len())
            .and_then(|index| self.variants.get(index));
        variant.map_or(Cow::Borrowed(self), |variant| {
            Cow::Owned(Self {
                name: variant.label.clone(),
                method: self.method,
                path: self.path.clone(),
                query: self.query.clone(),
                body: Some(variant.body.clone()),
                variants: Vec::new(),
                measures_content: self.measures_content,
            })
        })
    }

    /// True when the path template references the `{placeholder}` variable.
    #[must_use]
    pub fn uses_placeholder(&self, placeholder: &str) -> bool {
        crate::http::has_placeholder(&self.path, placeholder)
    }
}

/// Checks that the endpoint set is non-empty, uniquely named, and rooted.
///
/// # Errors
///
/// Returns a configuration error describing the first offending endpoint.
pub fn validate_endpoints(endpoints: &[EndpointDefinition]) -> AppResult<()> {
    if endpoints.is_empty() {
        return Err(AppError::config(ConfigError::NoEndpoints));
    }
    let mut seen = HashSet::new();
    for endpoint in endpoints {
        let labels = std::iter::once(endpoint.name.as_str())
            .chain(endpoint.variants.iter().map(|variant| variant.label.as_str()));
        for label in labels {
            if label.trim().is_empty() {
                return Err(AppError::config(ConfigError::EmptyName));
            }
            if !seen.insert(label) {
                return Err(AppError::config(ConfigError::DuplicateEndpoint {
                    name: label.to_owned(),
                }));
            }
        }
        if !endpoint.path.starts_with('/') {
            return Err(AppError::config(ConfigError::InvalidEndpointPath {
                name: endpoint.name.clone(),
                path: endpoint.path.clone(),
            }));
        }
    }
    Ok(())
}
