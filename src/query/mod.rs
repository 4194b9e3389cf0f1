//! Query execution for gql-fetch.
//!
//! Builds the request, performs the single round trip through a transport
//! and maps the response into a `QueryOutcome`.

pub mod executor;
pub mod outcome;
pub mod request;
pub mod response;
pub mod watcher;

pub use executor::QueryExecutor;
pub use outcome::{OutcomeSlots, QueryOutcome};
pub use request::{build_headers, resolve_url, RequestOptions};
pub use response::{join_error_messages, GraphQlError, GraphQlResponse};
pub use watcher::{QueryWatcher, StalePolicy};
