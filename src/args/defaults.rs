use super::types::Suite;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("archbench/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub(crate) const DEFAULT_CHARTS_PATH: &str = "performance_charts";
pub(crate) const DEFAULT_PARSING_WORKERS: usize = 4;

const API_REPORT_PATH: &str = "api_performance_results.json";
const PARSING_REPORT_PATH: &str = "performance_results.json";

pub(crate) const fn default_report_path(suite: Suite) -> &'static str {
    match suite {
        Suite::Api => API_REPORT_PATH,
        Suite::Parsing => PARSING_REPORT_PATH,
    }
}
