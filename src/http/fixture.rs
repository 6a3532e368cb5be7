use reqwest::header::HeaderMap;
use reqwest::{Client, Url};
use serde_json::{Value, json};
use tracing::{info, warn};

use super::client::join_url;
use crate::domain::suites::FIXTURE_TAGS;
use crate::error::{AppError, AppResult, FixtureError};

const ENTRIES_PATH: &str = "/api/entries";

/// Creates the entry that `{entry_id}` endpoints read, then tags it.
///
/// Tagging is best-effort: its failure is logged and the id is still returned.
///
/// # Errors
///
/// Returns a fixture error when the entry cannot be created or the response
/// carries no id.
pub async fn seed_entry(
    client: &Client,
    base_url: &Url,
    headers: &HeaderMap,
    fixture_url: &str,
) -> AppResult<String> {
    let url = join_url(base_url, ENTRIES_PATH)?;
    info!("Creating fixture entry for {}", fixture_url);
    let response = client
        .post(url.clone())
        .headers(headers.clone())
        .json(&json!({ "url": fixture_url }))
        .send()
        .await
        .map_err(|err| {
            AppError::fixture(FixtureError::CreateRequest {
                url: url.to_string(),
                source: err,
            })
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::fixture(FixtureError::CreateRejected {
            status: status.as_u16(),
            body,
        }));
    }

    let body: Value = response
        .json()
        .await
        .map_err(|err| AppError::fixture(FixtureError::CreateResponse { source: err }))?;
    let entry_id = entry_id(&body).ok_or_else(|| AppError::fixture(FixtureError::MissingId))?;
    info!("Fixture entry created with id {}", entry_id);

    attach_tags(client, base_url, headers, &entry_id).await;
    Ok(entry_id)
}

fn entry_id(body: &Value) -> Option<String> {
    match body.get("id")? {
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::String(_) | Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
            None
        }
    }
}

async fn attach_tags(client: &Client, base_url: &Url, headers: &HeaderMap, entry_id: &str) {
    let url = match join_url(base_url, &format!("{}/{}/tags", ENTRIES_PATH, entry_id)) {
        Ok(url) => url,
        Err(err) => {
            warn!("Skipping fixture tags: {}", err);
            return;
        }
    };
    let result = client
        .post(url)
        .headers(headers.clone())
        .json(&json!({ "tags": FIXTURE_TAGS }))
        .send()
        .await;
    match result {
        Ok(response) if response.status().is_success() => {}
        Ok(response) => warn!(
            "Failed to tag fixture entry {}: status {}",
            entry_id,
            response.status().as_u16()
        ),
        Err(err) => warn!("Failed to tag fixture entry {}: {}", entry_id, err),
    }
}
