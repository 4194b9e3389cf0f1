//! Request construction: URL resolution, headers and the JSON envelope.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::EndpointConfig;

/// HTTP method used for every query.
pub const METHOD: &str = "POST";

/// Content type of the request body.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Resolves the URL a query is sent to.
///
/// In development the endpoint is returned as-is (a relative URL routed by an
/// external proxy). Otherwise host and endpoint are concatenated. Missing
/// parts resolve to empty strings.
pub fn resolve_url(config: &EndpointConfig) -> String {
    let endpoint = config.endpoint.as_deref().unwrap_or_default();

    if config.mode().is_development() {
        return endpoint.to_string();
    }

    let host = config.host_uri.as_deref().unwrap_or_default();
    format!("{host}{endpoint}")
}

/// Builds the request headers.
///
/// Always carries `Content-Type: application/json`; adds a Basic
/// `Authorization` header only when a non-empty credential is configured.
pub fn build_headers(config: &EndpointConfig) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string());

    if let Some(credential) = config.credential() {
        headers.insert("Authorization".to_string(), basic_auth_value(credential));
    }

    headers
}

/// Encodes a `user:password` credential as a Basic authorization value.
pub fn basic_auth_value(credential: &str) -> String {
    format!("Basic {}", STANDARD.encode(credential))
}

/// JSON envelope carrying the query verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestBody<'a> {
    /// Query text; `None` serializes as `null`.
    pub query: Option<&'a str>,
}

/// Everything needed to issue one query request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// Always `POST`.
    pub method: &'static str,
    /// Resolved endpoint URL, relative in development.
    pub url: String,
    /// Header name to value, `Authorization` only with a credential.
    pub headers: BTreeMap<String, String>,
    /// Serialized `{"query": ...}` envelope.
    pub body: String,
}

impl RequestOptions {
    /// Builds request options for a query against the given endpoint.
    ///
    /// An absent query is transmitted as `null`.
    pub fn new(config: &EndpointConfig, query: Option<&str>) -> Self {
        Self {
            method: METHOD,
            url: resolve_url(config),
            headers: build_headers(config),
            body: encode_body(query),
        }
    }

    /// Returns the value of a header, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

fn encode_body(query: Option<&str>) -> String {
    // Serializing a struct of one optional &str cannot fail.
    serde_json::to_string(&RequestBody { query }).unwrap_or_else(|_| r#"{"query":null}"#.into())
}
