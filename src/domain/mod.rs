//! Immutable benchmark definitions and the run result they produce.
mod endpoint;
mod load;
mod outcome;
mod run;
pub mod suites;


pub use endpoint::{EndpointDefinition, QueryParams, RequestVariant, validate_endpoints};
pub use load::{LoadConfiguration, validate_loads};
pub use outcome::{ContentMetrics, Outcome, RequestOutcome};
pub use run::{LoadRun, RunResult};
