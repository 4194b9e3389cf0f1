//! End-to-end outcome mapping through the public API with a mock transport.

use gql_fetch::config::{EndpointConfig, RuntimeMode};
use gql_fetch::query::{build_headers, resolve_url, QueryExecutor, QueryWatcher, RequestOptions};
use gql_fetch::transport::MockTransport;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn prod_config() -> EndpointConfig {
    EndpointConfig::new(RuntimeMode::Other, "https://example.com", "/graphql")
}

/// Scenario: URL resolution per runtime mode
/// Given a development config, the relative endpoint is used as-is
/// Given any other mode, host and endpoint are concatenated
#[test]
fn test_url_resolution() {
    let dev = EndpointConfig::new(RuntimeMode::Development, "https://example.com", "/graphql");
    assert_eq!(resolve_url(&dev), "/graphql");
    assert_eq!(resolve_url(&prod_config()), "https://example.com/graphql");
}

/// Scenario: Authorization header only with a credential
#[test]
fn test_header_construction() {
    let plain = build_headers(&prod_config());
    assert_eq!(
        plain.into_iter().collect::<Vec<_>>(),
        vec![("Content-Type".to_string(), "application/json".to_string())]
    );

    let authed = build_headers(&prod_config().with_authorization("user:pass"));
    assert_eq!(
        authed.get("Authorization").map(String::as_str),
        Some("Basic dXNlcjpwYXNz")
    );
    assert_eq!(
        authed.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
}

/// Scenario: Body envelope
/// Given query "{ x }"
/// Then the body deserializes to {"query": "{ x }"}
#[test]
fn test_body_encoding() {
    let options = RequestOptions::new(&prod_config(), Some("{ x }"));
    let body: serde_json::Value = serde_json::from_str(&options.body).unwrap();
    assert_eq!(body, json!({"query": "{ x }"}));
}

/// Scenario: Data-only response
/// Then data is set and errorMessage is null
#[tokio::test]
async fn test_success_mapping() {
    let config = prod_config();
    let transport = MockTransport::new().with_body(r#"{"data":{"x":1}}"#);

    let outcome = QueryExecutor::new(&config, &transport).execute("{ x }").await;

    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({"data": {"x": 1}, "errorMessage": null})
    );
}

/// Scenario: Errors-only response
/// Then the messages are comma-joined in order and data is null
#[tokio::test]
async fn test_error_array_mapping() {
    let config = prod_config();
    let transport =
        MockTransport::new().with_body(r#"{"errors":[{"message":"A"},{"message":"B"}]}"#);

    let outcome = QueryExecutor::new(&config, &transport).execute("{ x }").await;

    assert_eq!(outcome.error_message.as_deref(), Some("A,B"));
    assert_eq!(outcome.data, None);
}

/// Scenario: Partial success
/// Given a response with both data and errors
/// Then both slots are set
#[tokio::test]
async fn test_partial_outcome() {
    let config = prod_config();
    let transport =
        MockTransport::new().with_body(r#"{"data":{"x":1},"errors":[{"message":"A"}]}"#);

    let outcome = QueryExecutor::new(&config, &transport).execute("{ x }").await;

    assert_eq!(outcome.data, Some(json!({"x": 1})));
    assert_eq!(outcome.error_message.as_deref(), Some("A"));
}

/// Scenario: Transport failure
/// Then errorMessage carries the failure description and data stays unset
#[tokio::test]
async fn test_transport_failure() {
    let config = prod_config();
    let transport = MockTransport::new().with_failure("dns error: no such host");

    let outcome = QueryExecutor::new(&config, &transport).execute("{ x }").await;

    assert_eq!(outcome.data, None);
    assert!(outcome
        .error_message
        .as_deref()
        .unwrap()
        .contains("dns error: no such host"));
}

/// Scenario: Re-invocation
/// Given the same query twice, only one request is sent
/// Given a different query, another request is sent
#[tokio::test]
async fn test_reinvocation_only_on_change() {
    let transport = Arc::new(MockTransport::new());
    let mut watcher = QueryWatcher::new(Arc::new(prod_config()), transport.clone());

    watcher.set_query("{ x }").unwrap().await.unwrap();
    assert!(watcher.set_query("{ x }").is_none());
    assert_eq!(transport.call_count(), 1);

    watcher.set_query("{ y }").unwrap().await.unwrap();
    assert_eq!(transport.call_count(), 2);
}

/// Scenario: Rapid query changes without waiting
/// Then every changed value issues its own request and all of them settle
#[tokio::test]
async fn test_rapid_changes_issue_one_request_each() {
    let transport = Arc::new(MockTransport::new());
    let mut watcher = QueryWatcher::new(Arc::new(prod_config()), transport.clone());

    let handles: Vec<_> = ["{ a }", "{ a }", "{ b }", "{ c }", "{ c }"]
        .into_iter()
        .filter_map(|q| watcher.set_query(q))
        .collect();
    futures::future::join_all(handles).await;

    assert_eq!(transport.call_count(), 3);
    assert_eq!(watcher.slots().settled, 3);
}
