use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token request to '{url}' failed: {source}")]
    TokenRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Token endpoint rejected credentials with status {status}: {body}")]
    TokenRejected { status: u16, body: String },
    #[error("Failed to decode token response: {source}")]
    TokenResponse {
        #[source]
        source: reqwest::Error,
    },
    #[error("Token response did not contain an access_token.")]
    MissingAccessToken,
    #[error("Access token is not a valid header value: {source}")]
    InvalidToken {
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
}
