//! Mock transport for testing.
//!
//! Replays canned replies in order and records every request it receives.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{FetchError, Result};
use crate::query::RequestOptions;
use crate::transport::{GraphQlTransport, TransportResponse};

/// A canned reply, optionally delayed to reorder completions.
#[derive(Debug, Clone)]
struct MockReply {
    outcome: std::result::Result<TransportResponse, String>,
    delay: Option<Duration>,
}

/// Mock transport that returns queued replies without touching the network.
///
/// When the queue is empty the default reply (`{"data":null}`) is returned.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<RequestOptions>>,
    calls: AtomicUsize,
}

impl MockTransport {
    /// Creates a mock with no queued replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a 200 response with the given body.
    pub fn with_body(self, body: impl Into<String>) -> Self {
        self.with_response(TransportResponse::ok(body))
    }

    /// Queues a response.
    pub fn with_response(self, response: TransportResponse) -> Self {
        self.push(Ok(response), None);
        self
    }

    /// Queues a 200 response that completes after `delay`.
    pub fn with_delayed_body(self, body: impl Into<String>, delay: Duration) -> Self {
        self.push(Ok(TransportResponse::ok(body)), Some(delay));
        self
    }

    /// Queues a transport failure with the given description.
    pub fn with_failure(self, description: impl Into<String>) -> Self {
        self.push(Err(description.into()), None);
        self
    }

    /// Number of requests sent so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Copies of every request received, in arrival order.
    pub fn requests(&self) -> Vec<RequestOptions> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<RequestOptions> {
        self.requests().pop()
    }

    fn push(
        &self,
        outcome: std::result::Result<TransportResponse, String>,
        delay: Option<Duration>,
    ) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(MockReply { outcome, delay });
        }
    }

    fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .unwrap_or_else(|| MockReply {
                outcome: Ok(TransportResponse::ok(r#"{"data":null}"#)),
                delay: None,
            })
    }
}

#[async_trait]
impl GraphQlTransport for MockTransport {
    async fn send(&self, request: &RequestOptions) -> Result<TransportResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let reply = self.next_reply();
        if let Some(delay) = reply.delay {
            tokio::time::sleep(delay).await;
        }

        reply.outcome.map_err(FetchError::transport)
    }
}
