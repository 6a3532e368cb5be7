use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Word and image counts of the article content returned on entry creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentMetrics {
    pub word_count: u64,
    pub image_count: u64,
}

impl ContentMetrics {
    /// Whitespace-separated words and `<img` tags in the content HTML.
    #[must_use]
    pub fn from_content(content: &str) -> Self {
        let count = |total: usize| u64::try_from(total).unwrap_or(u64::MAX);
        Self {
            word_count: count(content.split_whitespace().count()),
            image_count: count(content.matches("<img").count()),
        }
    }
}

/// Classification of one request. Fields only exist where they apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A response with status below 400 whose body was fully read.
    Success {
        status: u16,
        response_bytes: u64,
        /// Present for content-measuring endpoints answering with JSON.
        content: Option<ContentMetrics>,
    },
    /// An error status (`status` set) or a transport failure (`status` empty).
    Error { status: Option<u16>, detail: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "OutcomeRecord", try_from = "OutcomeRecord")]
pub struct RequestOutcome {
    pub endpoint: String,
    pub elapsed: Duration,
    pub outcome: Outcome,
}

impl RequestOutcome {
    #[must_use]
    pub fn success(
        endpoint: impl Into<String>,
        elapsed: Duration,
        status: u16,
        response_bytes: u64,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            elapsed,
            outcome: Outcome::Success {
                status,
                response_bytes,
                content: None,
            },
        }
    }

    /// Attaches content metrics; error outcomes are left unchanged.
    #[must_use]
    pub fn with_content(mut self, metrics: ContentMetrics) -> Self {
        if let Outcome::Success { content, .. } = &mut self.outcome {
            *content = Some(metrics);
        }
        self
    }

    #[must_use]
    pub fn error(
        endpoint: impl Into<String>,
        elapsed: Duration,
        status: Option<u16>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            elapsed,
            outcome: Outcome::Error {
                status,
                detail: detail.into(),
            },
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match &self.outcome {
            Outcome::Success { status, .. } => Some(*status),
            Outcome::Error { status, .. } => *status,
        }
    }

    #[must_use]
    pub const fn content(&self) -> Option<ContentMetrics> {
        match &self.outcome {
            Outcome::Success { content, .. } => *content,
            Outcome::Error { .. } => None,
        }
    }

    #[must_use]
    pub fn error_detail(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success { .. } => None,
            Outcome::Error { detail, .. } => Some(detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum OutcomeKind {
    Success,
    Error,
}

/// Flat wire shape of an outcome inside the JSON report.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OutcomeRecord {
    endpoint: String,
    status: OutcomeKind,
    time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    word_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_count: Option<u64>,
}

impl From<RequestOutcome> for OutcomeRecord {
    fn from(value: RequestOutcome) -> Self {
        let time = value.elapsed.as_secs_f64();
        match value.outcome {
            Outcome::Success {
                status,
                response_bytes,
                content,
            } => OutcomeRecord {
                endpoint: value.endpoint,
                status: OutcomeKind::Success,
                time,
                status_code: Some(status),
                response_size: Some(response_bytes),
                error: None,
                word_count: content.map(|metrics| metrics.word_count),
                image_count: content.map(|metrics| metrics.image_count),
            },
            Outcome::Error { status, detail } => OutcomeRecord {
                endpoint: value.endpoint,
                status: OutcomeKind::Error,
                time,
                status_code: status,
                response_size: None,
                error: Some(detail),
                word_count: None,
                image_count: None,
            },
        }
    }
}

impl TryFrom<OutcomeRecord> for RequestOutcome {
    type Error = ValidationError;

    fn try_from(record: OutcomeRecord) -> Result<Self, ValidationError> {
        let elapsed = Duration::try_from_secs_f64(record.time)
            .map_err(|_err| ValidationError::InvalidOutcomeTime { value: record.time })?;
        let outcome = match record.status {
            OutcomeKind::Success => {
                if record.error.is_some() {
                    return Err(ValidationError::InvalidOutcomeRecord {
                        reason: "success carries an error detail",
                    });
                }
                let status = record
                    .status_code
                    .ok_or(ValidationError::InvalidOutcomeRecord {
                        reason: "success without status_code",
                    })?;
                let response_bytes =
                    record
                        .response_size
                        .ok_or(ValidationError::InvalidOutcomeRecord {
                            reason: "success without response_size",
                        })?;
                let content = match (record.word_count, record.image_count) {
                    (Some(word_count), Some(image_count)) => Some(ContentMetrics {
                        word_count,
                        image_count,
                    }),
                    (None, None) => None,
                    (Some(_), None) | (None, Some(_)) => {
                        return Err(ValidationError::InvalidOutcomeRecord {
                            reason: "word_count and image_count must appear together",
                        });
                    }
                };
                Outcome::Success {
                    status,
                    response_bytes,
                    content,
                }
            }
            OutcomeKind::Error => {
                if record.response_size.is_some() {
                    return Err(ValidationError::InvalidOutcomeRecord {
                        reason: "error carries a response_size",
                    });
                }
                if record.word_count.is_some() || record.image_count.is_some() {
                    return Err(ValidationError::InvalidOutcomeRecord {
                        reason: "error carries content metrics",
                    });
                }
                let detail = record.error.ok_or(ValidationError::InvalidOutcomeRecord {
                    reason: "error without detail",
                })?;
                Outcome::Error {
                    status: record.status_code,
                    detail,
                }
            }
        };
        Ok(RequestOutcome {
            endpoint: record.endpoint,
            elapsed,
            outcome,
        })
    }
}
