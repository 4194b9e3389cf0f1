//! Transports that carry a query request to the endpoint.
//!
//! The transport call is the only suspension point of a query invocation.

pub mod http;
pub mod mock;

pub use http::HttpTransport;
pub use mock::MockTransport;

use async_trait::async_trait;

use crate::error::Result;
use crate::query::RequestOptions;

/// Raw response as produced by the network layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Undecoded response body.
    pub body: String,
}

impl TransportResponse {
    /// Creates a 200 response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::with_status(200, body)
    }

    /// Creates a response with an explicit status.
    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for anything that can perform one request round trip.
///
/// Implementations must be thread-safe (Send + Sync) so one transport can be
/// shared by concurrent in-flight queries.
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    /// Sends the request once and returns the raw response.
    ///
    /// Errors are transport failures only; HTTP error statuses are returned
    /// as ordinary responses.
    async fn send(&self, request: &RequestOptions) -> Result<TransportResponse>;
}
