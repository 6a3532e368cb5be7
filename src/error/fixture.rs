use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to create fixture entry at '{url}': {source}")]
    CreateRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Fixture entry creation returned status {status}: {body}")]
    CreateRejected { status: u16, body: String },
    #[error("Failed to decode fixture entry response: {source}")]
    CreateResponse {
        #[source]
        source: reqwest::Error,
    },
    #[error("Fixture entry response did not contain an id.")]
    MissingId,
}
