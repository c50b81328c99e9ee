//! Snapshot codec
//!
//! The persisted form is a single JSON document. Decoding never panics:
//! malformed input comes back as [`LedgerError::StorageDecode`] and the
//! caller decides on a fallback.

use crate::error::{LedgerError, LedgerResult};
use crate::models::Snapshot;

/// Serialize a snapshot to its stored representation
pub fn encode(snapshot: &Snapshot) -> LedgerResult<String> {
    serde_json::to_string(snapshot)
        .map_err(|e| LedgerError::Unexpected(format!("Failed to encode snapshot: {}", e)))
}

/// Parse a stored representation back into a snapshot
pub fn decode(raw: &str) -> LedgerResult<Snapshot> {
    if raw.trim().is_empty() {
        return Err(LedgerError::StorageDecode("stored value is empty".into()));
    }
    serde_json::from_str(raw).map_err(|e| LedgerError::StorageDecode(e.to_string()))
}
