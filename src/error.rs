//! Error types for the ledger store
//!
//! Every fallible operation in the crate returns [`LedgerResult`]. The
//! variants follow the ledger's error taxonomy: caller mistakes
//! (`Validation`, `NotFound`, `InFlight`) are surfaced verbatim, while
//! storage and serialization failures are reported with a generic message.

use thiserror::Error;

/// Message shown to users for failures they cannot act on.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// The main error type for ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Caller-supplied data failed a domain rule
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced entity does not exist
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Another operation on the same entity has not finished yet
    #[error("{entity_type} is already being processed: {identifier}")]
    InFlight {
        entity_type: &'static str,
        identifier: String,
    },

    /// Persisted snapshot could not be read
    #[error("Stored ledger data is unreadable: {0}")]
    StorageDecode(String),

    /// Durable medium failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Anything else
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl LedgerError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for bills
    pub fn bill_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Bill",
            identifier: identifier.into(),
        }
    }

    /// Create an "in flight" error for a bill payment
    pub fn bill_in_flight(identifier: impl Into<String>) -> Self {
        Self::InFlight {
            entity_type: "Bill",
            identifier: identifier.into(),
        }
    }

    /// Create an "in flight" error for a transaction submission
    pub fn transaction_in_flight(kind: impl Into<String>) -> Self {
        Self::InFlight {
            entity_type: "Transaction",
            identifier: kind.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error was caused by a concurrent operation on the same entity
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight { .. })
    }

    /// Check if this error falls outside the caller-correctable categories
    pub fn is_unexpected(&self) -> bool {
        !(self.is_validation() || self.is_not_found() || self.is_in_flight())
    }

    /// Human-readable message suitable for end users
    ///
    /// Caller-correctable errors keep their detail; everything else collapses
    /// into [`GENERIC_FAILURE_MESSAGE`].
    pub fn user_message(&self) -> String {
        if self.is_unexpected() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
