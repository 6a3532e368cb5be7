use clap::Parser;
use std::time::Duration;

use super::defaults::{DEFAULT_BASE_URL, DEFAULT_CHARTS_PATH, default_report_path};
use super::parsers::{parse_duration_arg, parse_positive_usize};
use super::types::{PositiveUsize, Suite};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Latency benchmark harness for article-archiving HTTP APIs - authenticates, drives escalating concurrent load against a fixed endpoint set, and reports per-endpoint statistics."
)]
pub struct BenchArgs {
    /// Base URL of the target service
    #[arg(long = "base-url", short = 'u', env = "ARCHBENCH_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Static API key (takes priority over OAuth credentials)
    #[arg(long = "api-key", env = "ARCHBENCH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// OAuth client ID for the password grant
    #[arg(long = "client-id", env = "ARCHBENCH_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth client secret for the password grant
    #[arg(
        long = "client-secret",
        env = "ARCHBENCH_CLIENT_SECRET",
        hide_env_values = true
    )]
    pub client_secret: Option<String>,

    /// Account username for the password grant
    #[arg(long, env = "ARCHBENCH_USERNAME")]
    pub username: Option<String>,

    /// Account password for the password grant
    #[arg(long, env = "ARCHBENCH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Endpoint suite to benchmark
    #[arg(long, value_enum, default_value_t = Suite::Api)]
    pub suite: Suite,

    /// JSON file with article URLs for the parsing suite (a list or {"urls": [...]})
    #[arg(long = "urls")]
    pub urls_file: Option<String>,

    /// Output file for the JSON report (defaults per suite)
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Directory to write charts to
    #[arg(long = "charts", short = 'c', default_value = DEFAULT_CHARTS_PATH)]
    pub charts_path: String,

    /// Disable chart generation
    #[arg(long = "no-charts", short = 'n')]
    pub no_charts: bool,

    /// Override the concurrency of every load level (parsing suite: worker count)
    #[arg(long, short = 'w', value_parser = parse_positive_usize)]
    pub workers: Option<PositiveUsize>,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = "30s", value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Connection timeout (supports ms/s/m/h)
    #[arg(long = "connect-timeout", default_value = "10s", value_parser = parse_duration_arg)]
    pub connect_timeout: Duration,

    /// Enable verbose logging (sets log level to debug unless overridden by ARCHBENCH_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Path to config file (TOML/JSON). Defaults to ./archbench.toml or ./archbench.json if present.
    #[arg(long)]
    pub config: Option<String>,
}

impl BenchArgs {
    /// Report path, falling back to the suite's conventional file name.
    #[must_use]
    pub fn report_path(&self) -> &str {
        self.output
            .as_deref()
            .unwrap_or_else(|| default_report_path(self.suite))
    }
}
