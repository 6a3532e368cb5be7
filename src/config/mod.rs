//! Configuration loading and application.
mod apply;
mod build;
mod loader;
pub mod types;


pub use apply::apply_config;
pub use build::{build_harness, load_url_file};
pub use loader::load_config;

#[cfg(test)]
pub(crate) use loader::load_config_file;
