//! gql-fetch - a small GraphQL-over-HTTP query executor.
//!
//! This library exposes the core modules for the binary and for integration tests.

pub mod config;
pub mod error;
pub mod logging;
pub mod query;
pub mod transport;

pub use config::{EndpointConfig, RuntimeMode};
pub use error::{FetchError, Result};
pub use query::{QueryExecutor, QueryOutcome, QueryWatcher};
