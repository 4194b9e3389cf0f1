//! reqwest-backed transport.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use tracing::{debug, warn};

use crate::error::{FetchError, Result};
use crate::query::RequestOptions;
use crate::transport::{GraphQlTransport, TransportResponse};

/// HTTP transport sharing one connection pool across requests.
///
/// No timeout is configured: a request that never completes leaves its
/// outcome unset.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with a default client.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| FetchError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn header_map(request: &RequestOptions) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(request.headers.len());
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                FetchError::transport(format!("Invalid header name '{name}': {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                FetchError::transport(format!("Invalid value for header '{name}': {e}"))
            })?;
            headers.append(name, value);
        }
        Ok(headers)
    }
}

#[async_trait]
impl GraphQlTransport for HttpTransport {
    async fn send(&self, request: &RequestOptions) -> Result<TransportResponse> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|e| FetchError::transport(format!("Invalid method: {e}")))?;
        let headers = Self::header_map(request)?;

        debug!("{} {}", request.method, request.url);

        let response = self
            .client
            .request(method, request.url.as_str())
            .headers(headers)
            .body(request.body.clone())
            .send()
            .await
            .map_err(|e| {
                warn!("Request to '{}' failed: {}", request.url, e);
                FetchError::transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::transport(format!("Failed to read response: {}", e)))?;

        Ok(TransportResponse {
            status: status.as_u16(),
            body,
        })
    }
}
