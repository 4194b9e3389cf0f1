//! Re-invocation of a query whenever its input changes.
//!
//! A `QueryWatcher` owns the two outcome slots for one consumer. Setting a
//! new query value spawns exactly one request; setting the same value again
//! is a no-op. Completions publish into the slots, which consumers observe
//! either as the latest snapshot (`subscribe`) or as an ordered stream of
//! every publication (`publications`).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::EndpointConfig;
use crate::query::executor::QueryExecutor;
use crate::query::outcome::OutcomeSlots;
use crate::transport::GraphQlTransport;

/// What to do with a response that settles after a newer query was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Publish every completion; whichever settles last wins.
    #[default]
    LastSettled,
    /// Drop completions of queries that have since been superseded.
    LatestIssued,
}

/// Re-runs a query whenever its value changes and owns the output slots.
pub struct QueryWatcher {
    config: Arc<EndpointConfig>,
    transport: Arc<dyn GraphQlTransport>,
    policy: StalePolicy,
    /// Last query value seen; `None` until the first `set_query`.
    current: Option<Option<String>>,
    /// Generation of the most recently issued request.
    generation: Arc<AtomicU64>,
    slots: Arc<watch::Sender<OutcomeSlots>>,
    /// Receivers of every publication, in settle order.
    listeners: Arc<Mutex<Vec<mpsc::UnboundedSender<OutcomeSlots>>>>,
}

impl QueryWatcher {
    /// Creates a watcher with no query set and empty slots.
    pub fn new(config: Arc<EndpointConfig>, transport: Arc<dyn GraphQlTransport>) -> Self {
        let (slots, _) = watch::channel(OutcomeSlots::default());
        Self {
            config,
            transport,
            policy: StalePolicy::default(),
            current: None,
            generation: Arc::new(AtomicU64::new(0)),
            slots: Arc::new(slots),
            listeners: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sets the stale-response policy.
    pub fn with_policy(mut self, policy: StalePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Updates the query input.
    ///
    /// Returns the handle of the spawned request when the value changed, or
    /// `None` when it equals the previous value. Must be called from within a
    /// tokio runtime. In-flight requests are never cancelled.
    pub fn set_query<'q>(&mut self, query: impl Into<Option<&'q str>>) -> Option<JoinHandle<()>> {
        let query = query.into().map(str::to_owned);
        if self.current.as_ref() == Some(&query) {
            debug!("Query unchanged, not re-issuing");
            return None;
        }
        self.current = Some(query.clone());

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.generation);
        let config = Arc::clone(&self.config);
        let transport = Arc::clone(&self.transport);
        let slots = Arc::clone(&self.slots);
        let listeners = Arc::clone(&self.listeners);
        let policy = self.policy;

        Some(tokio::spawn(async move {
            let outcome = QueryExecutor::new(&config, transport.as_ref())
                .execute(query.as_deref())
                .await;

            if policy == StalePolicy::LatestIssued
                && latest.load(Ordering::SeqCst) != generation
            {
                debug!("Dropping stale response for generation {}", generation);
                return;
            }

            // Listeners are fed under the slot lock so they see settle order.
            slots.send_modify(|slots| {
                slots.publish(outcome);
                if let Ok(mut listeners) = listeners.lock() {
                    listeners.retain(|tx| tx.send(slots.clone()).is_ok());
                }
            });
        }))
    }

    /// Current query value, if one was ever set.
    pub fn query(&self) -> Option<&str> {
        self.current.as_ref().and_then(|q| q.as_deref())
    }

    /// Snapshot of the output slots.
    pub fn slots(&self) -> OutcomeSlots {
        self.slots.borrow().clone()
    }

    /// Receiver of the latest slot values.
    ///
    /// Publications that settle between two reads are coalesced; use
    /// `publications` to observe each one.
    pub fn subscribe(&self) -> watch::Receiver<OutcomeSlots> {
        self.slots.subscribe()
    }

    /// Stream of every publication from now on, in settle order.
    ///
    /// The stream ends once the watcher and all of its in-flight requests
    /// are gone.
    pub fn publications(&self) -> mpsc::UnboundedReceiver<OutcomeSlots> {
        let (tx, rx) = mpsc::unbounded_channel();
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(tx);
        }
        rx
    }
}
