//! Built-in endpoint and load sets.
use serde_json::json;

use super::{EndpointDefinition, LoadConfiguration, RequestVariant};
use crate::args::{HttpMethod, PositiveUsize};

/// Path variable filled with the id of the seeded fixture entry.
pub const ENTRY_ID_PLACEHOLDER: &str = "entry_id";
pub const FIXTURE_URL: &str = "https://example.com/performance-test";
pub const FIXTURE_TAGS: &str = "performance,test,api";

pub const DEFAULT_ARTICLE_URLS: [&str; 8] = [
    "https://example.com/simple-text",
    "https://news.ycombinator.com/item?id=26453318",
    "https://www.nationalgeographic.com/animals/article/160122-animals-insects-pandas-science-world",
    "https://en.wikipedia.org/wiki/World_War_II",
    "https://www.nytimes.com/",
    "https://www.theguardian.com/international",
    "https://medium.com/",
    "https://www.bloomberg.com/",
];

/// Name of the single load level the parsing suite runs.
pub const PARSING_LOAD_NAME: &str = "Parsing";
pub const PARSING_ENDPOINT_NAME: &str = "Parse articles";

#[must_use]
pub fn api_endpoints() -> Vec<EndpointDefinition> {
    vec![
        EndpointDefinition::new("Get entries", HttpMethod::Get, "/api/entries")
            .with_query("page", "1")
            .with_query("perPage", "30"),
        EndpointDefinition::new("Get entry by ID", HttpMethod::Get, "/api/entries/{entry_id}"),
        EndpointDefinition::new("Search entries", HttpMethod::Get, "/api/search")
            .with_query("term", "test")
            .with_query("page", "1"),
        EndpointDefinition::new("Get tags", HttpMethod::Get, "/api/tags"),
        EndpointDefinition::new("Create entry", HttpMethod::Post, "/api/entries")
            .with_body(json!({ "url": "https://example.com" })),
    ]
}

#[must_use]
pub fn api_loads() -> Vec<LoadConfiguration> {
    [("Light load", 1, 5), ("Medium load", 5, 10), ("Heavy load", 10, 15)]
        .into_iter()
        .filter_map(|(name, concurrency, repeats)| {
            Some(LoadConfiguration::new(
                name,
                PositiveUsize::new(concurrency)?,
                PositiveUsize::new(repeats)?,
            ))
        })
        .collect()
}

/// One entry-creation endpoint whose request slots each submit one article
/// URL; outcomes are labelled `Parse <url>`.
#[must_use]
pub fn parsing_endpoints<S>(urls: &[S]) -> Vec<EndpointDefinition>
where
    S: AsRef<str>,
{
    let variants = urls
        .iter()
        .map(|url| {
            let url = url.as_ref();
            RequestVariant::new(format!("Parse {}", url), json!({ "url": url }))
        })
        .collect();
    vec![
        EndpointDefinition::new(PARSING_ENDPOINT_NAME, HttpMethod::Post, "/api/entries")
            .with_variants(variants)
            .measuring_content(),
    ]
}

/// Every article is submitted once, with `workers` submissions in flight.
#[must_use]
pub fn parsing_loads(workers: PositiveUsize, article_count: usize) -> Vec<LoadConfiguration> {
    let repeats = PositiveUsize::new(article_count).unwrap_or(PositiveUsize::ONE);
    vec![LoadConfiguration::new(PARSING_LOAD_NAME, workers, repeats)]
}
