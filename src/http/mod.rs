//! HTTP plumbing: client setup, credentials, fixture seeding, and timed execution.
mod auth;
mod client;
mod executor;
mod fixture;
mod template;


pub use auth::{API_KEY_HEADER, AuthMode, Credentials, TOKEN_PATH, resolve_auth_headers};
pub use client::{build_client, join_url, parse_base_url};
pub use executor::{HttpExecutor, RequestContext, RequestExecutor};
pub use fixture::seed_entry;
pub use template::{has_placeholder, render_path};
