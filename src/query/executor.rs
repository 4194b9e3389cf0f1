//! Single-shot query execution.
//!
//! Failures never escape `execute`; they are reported through the error
//! slot of the returned outcome.

use tracing::{debug, warn};

use crate::config::EndpointConfig;
use crate::query::outcome::QueryOutcome;
use crate::query::request::RequestOptions;
use crate::query::response::GraphQlResponse;
use crate::transport::GraphQlTransport;

/// Query executor bound to one endpoint configuration and transport.
pub struct QueryExecutor<'a> {
    config: &'a EndpointConfig,
    transport: &'a dyn GraphQlTransport,
}

impl<'a> QueryExecutor<'a> {
    /// Creates a new query executor.
    pub fn new(config: &'a EndpointConfig, transport: &'a dyn GraphQlTransport) -> Self {
        Self { config, transport }
    }

    /// Sends the query and maps the response to an outcome.
    ///
    /// - a non-empty `errors` array sets the error slot to the comma-joined messages
    /// - present `data` sets the data slot, even alongside errors
    /// - transport and decode failures set the error slot to the failure description
    ///
    /// Non-2xx statuses are not special: the body is decoded all the same.
    pub async fn execute<'q>(&self, query: impl Into<Option<&'q str>>) -> QueryOutcome {
        let request = RequestOptions::new(self.config, query.into());
        debug!("Issuing query to {}", self.config.display_string());

        let response = match self.transport.send(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Query failed: {}", e);
                return QueryOutcome::error(e.to_string());
            }
        };

        if !response.is_success() {
            warn!(
                "Endpoint answered {}; decoding the body anyway",
                response.status
            );
        }

        let decoded = match GraphQlResponse::from_body(&response.body) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("Undecodable response (status {}): {}", response.status, e);
                return QueryOutcome::error(e.to_string());
            }
        };

        let outcome = QueryOutcome {
            error_message: decoded.error_message(),
            data: decoded.data,
        };

        if let Some(message) = &outcome.error_message {
            debug!("Endpoint returned errors: {}", message);
        }

        outcome
    }
}
