//! Core library for the `archbench` CLI.
//!
//! `archbench` measures the latency of an article-archiving HTTP API under
//! escalating concurrent load. The crate provides the pieces the binary wires
//! together: CLI arguments and config files, credential resolution, the
//! concurrent request dispatcher, statistics aggregation, and report output.
pub mod app;
pub mod args;
pub mod charts;
pub mod config;
pub mod domain;
pub mod entry;
pub mod error;
pub mod http;
pub mod logger;
pub mod metrics;
pub mod sinks;

#[cfg(test)]
pub(crate) mod test_support;
