/// File name for an endpoint's chart: lowercase, with spaces and slashes
/// turned into underscores.
#[must_use]
pub fn chart_file_name(endpoint: &str) -> String {
    let stem: String = endpoint
        .chars()
        .map(|ch| match ch {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    format!("{}.png", stem.to_lowercase())
}
