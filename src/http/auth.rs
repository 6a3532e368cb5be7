use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, info};

use super::client::join_url;
use crate::error::{AppError, AppResult, AuthError, ConfigError};

/// Header carrying a static API key (`X-API-Key`).
pub const API_KEY_HEADER: &str = "x-api-key";
pub const TOKEN_PATH: &str = "/oauth/v2/token";

/// Raw credential inputs; empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// The authentication mode a credential set resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode<'creds> {
    ApiKey(&'creds str),
    Password {
        client_id: &'creds str,
        client_secret: &'creds str,
        username: &'creds str,
        password: &'creds str,
    },
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|value| !value.is_empty())
}

impl Credentials {
    /// Picks the API key when set, otherwise the OAuth password grant.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingCredentials` naming the absent fields when
    /// neither mode is complete.
    pub fn mode(&self) -> AppResult<AuthMode<'_>> {
        if let Some(api_key) = present(self.api_key.as_ref()) {
            return Ok(AuthMode::ApiKey(api_key));
        }
        let client_id = present(self.client_id.as_ref());
        let client_secret = present(self.client_secret.as_ref());
        let username = present(self.username.as_ref());
        let password = present(self.password.as_ref());
        if let (Some(client_id), Some(client_secret), Some(username), Some(password)) =
            (client_id, client_secret, username, password)
        {
            return Ok(AuthMode::Password {
                client_id,
                client_secret,
                username,
                password,
            });
        }

        let missing: Vec<&str> = [
            ("client_id", client_id.is_none()),
            ("client_secret", client_secret.is_none()),
            ("username", username.is_none()),
            ("password", password.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();
        Err(AppError::config(ConfigError::MissingCredentials {
            missing: format!("api_key or {}", missing.join(", ")),
        }))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Resolves the headers every measurement request carries.
///
/// An API key is used as-is without any network call. Otherwise a single
/// password-grant exchange is made against the token endpoint.
///
/// # Errors
///
/// Returns a configuration error for incomplete credentials and an
/// authentication error when the token exchange fails.
pub async fn resolve_auth_headers(
    client: &Client,
    base_url: &Url,
    credentials: &Credentials,
) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    match credentials.mode()? {
        AuthMode::ApiKey(api_key) => {
            info!("Authenticating with API key");
            let value = HeaderValue::from_str(api_key)
                .map_err(|err| AppError::config(ConfigError::InvalidApiKey { source: err }))?;
            headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
        }
        AuthMode::Password {
            client_id,
            client_secret,
            username,
            password,
        } => {
            let token = fetch_token(
                client,
                base_url,
                &[
                    ("grant_type", "password"),
                    ("client_id", client_id),
                    ("client_secret", client_secret),
                    ("username", username),
                    ("password", password),
                ],
            )
            .await?;
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|err| AppError::auth(AuthError::InvalidToken { source: err }))?;
            headers.insert(AUTHORIZATION, value);
        }
    }
    Ok(headers)
}

async fn fetch_token(client: &Client, base_url: &Url, form: &[(&str, &str)]) -> AppResult<String> {
    let url = join_url(base_url, TOKEN_PATH)?;
    info!("Requesting OAuth token from {}", url);
    let response = client
        .post(url.clone())
        .form(form)
        .send()
        .await
        .map_err(|err| {
            AppError::auth(AuthError::TokenRequest {
                url: url.to_string(),
                source: err,
            })
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::auth(AuthError::TokenRejected {
            status: status.as_u16(),
            body,
        }));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|err| AppError::auth(AuthError::TokenResponse { source: err }))?;
    debug!("OAuth token received");
    token
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::auth(AuthError::MissingAccessToken))
}
