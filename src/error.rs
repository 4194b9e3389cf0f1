//! Error types for gql-fetch.
//!
//! Defines the main error enum used throughout the crate.

use thiserror::Error;

/// Main error type for gql-fetch operations.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failures (DNS, connection refused, malformed URL, etc.)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body could not be decoded as a GraphQL response
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration errors (invalid config file, bad endpoint URL, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FetchError {
    /// Creates a transport error with the given message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates a decode error with the given message.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Transport(_) => "Transport Error",
            Self::Decode(_) => "Decode Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using FetchError.
pub type Result<T> = std::result::Result<T, FetchError>;
