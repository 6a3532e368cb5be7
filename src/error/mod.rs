mod app;
mod auth;
mod config;
mod fixture;
mod http;
mod sink;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use auth::AuthError;
pub use config::ConfigError;
pub use fixture::FixtureError;
pub use http::HttpError;
pub use sink::SinkError;
pub use validation::ValidationError;
