//! Query outcomes and the two independent result slots.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of one query invocation.
///
/// `data` and `error_message` are independent: a partial success carries
/// both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOutcome {
    /// The response's `data` member, when present and non-null.
    pub data: Option<Value>,
    /// Comma-joined GraphQL error messages, or the failure description.
    pub error_message: Option<String>,
}

impl QueryOutcome {
    /// Outcome carrying only data.
    pub fn data(data: Value) -> Self {
        Self {
            data: Some(data),
            error_message: None,
        }
    }

    /// Outcome carrying only an error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error_message: Some(message.into()),
        }
    }

    /// True when both data and an error were returned.
    pub fn is_partial(&self) -> bool {
        self.data.is_some() && self.error_message.is_some()
    }
}

/// Observable output slots fed by successive outcomes.
///
/// Publishing overwrites only the slots an outcome carries; a slot is never
/// cleared, so an earlier error survives a later success.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeSlots {
    /// Most recently published data.
    pub data: Option<Value>,
    /// Most recently published error message.
    pub error_message: Option<String>,
    /// Number of outcomes published so far.
    pub settled: u64,
}

impl OutcomeSlots {
    /// Writes the slots carried by `outcome` and counts the publication.
    pub fn publish(&mut self, outcome: QueryOutcome) {
        if let Some(message) = outcome.error_message {
            self.error_message = Some(message);
        }
        if let Some(data) = outcome.data {
            self.data = Some(data);
        }
        self.settled += 1;
    }

    /// Current slot values as an outcome.
    pub fn outcome(&self) -> QueryOutcome {
        QueryOutcome {
            data: self.data.clone(),
            error_message: self.error_message.clone(),
        }
    }
}
