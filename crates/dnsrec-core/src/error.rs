//! Error types for DNS record management
//!
//! This module defines all error types used throughout the workspace.

use crate::traits::Record;
use thiserror::Error;

/// Result type alias for record operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for DNS record management
#[derive(Error, Debug)]
pub enum Error {
    /// Connection-level failure (request never produced a response)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider answered with a status code >= 400
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code
        status: u16,
        /// Raw response body, kept for diagnostics
        body: String,
    },

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// No zone matched the given name
    #[error("Zone not found: {0}")]
    ZoneNotFound(String),

    /// More than one zone matched the given name
    #[error("Expected exactly 1 zone for {zone}, got {matches}")]
    AmbiguousZone {
        /// Normalized zone name that was looked up
        zone: String,
        /// Number of zones the provider reported
        matches: usize,
    },

    /// Delete endpoint answered with an error message instead of an empty body
    #[error("Delete rejected: {0}")]
    DeleteRejected(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A batch stopped part way after committing remote changes.
    ///
    /// `completed` holds the records the call already produced; they are
    /// live on the provider side and are not rolled back.
    #[error("{operation} stopped at record {failed_at} after {} completed: {source}", .completed.len())]
    Incomplete {
        /// Name of the batch operation (`append`, `set`, `delete`)
        operation: &'static str,
        /// Index of the input record that failed
        failed_at: usize,
        /// Records committed before the failure
        completed: Vec<Record>,
        /// The failure that stopped the batch
        #[source]
        source: Box<Error>,
    },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an HTTP status error
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a "zone not found" error
    pub fn zone_not_found(zone: impl Into<String>) -> Self {
        Self::ZoneNotFound(zone.into())
    }

    /// Create an ambiguous zone error
    pub fn ambiguous_zone(zone: impl Into<String>, matches: usize) -> Self {
        Self::AmbiguousZone {
            zone: zone.into(),
            matches,
        }
    }

    /// Create a delete rejection error
    pub fn delete_rejected(msg: impl Into<String>) -> Self {
        Self::DeleteRejected(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Wrap a batch failure together with what was already committed
    pub fn incomplete(
        operation: &'static str,
        failed_at: usize,
        completed: Vec<Record>,
        source: Error,
    ) -> Self {
        Self::Incomplete {
            operation,
            failed_at,
            completed,
            source: Box::new(source),
        }
    }

    /// The underlying failure, looking through [`Error::Incomplete`]
    pub fn root(&self) -> &Error {
        match self {
            Self::Incomplete { source, .. } => source.root(),
            other => other,
        }
    }

    /// Records committed before a batch failed (empty for other variants)
    pub fn committed(&self) -> &[Record] {
        match self {
            Self::Incomplete { completed, .. } => completed,
            _ => &[],
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
