//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod tests;

pub use cli::BenchArgs;
pub use types::{HttpMethod, PositiveUsize, Suite};

pub(crate) use defaults::{
    DEFAULT_BASE_URL, DEFAULT_CHARTS_PATH, DEFAULT_PARSING_WORKERS, DEFAULT_USER_AGENT,
};
