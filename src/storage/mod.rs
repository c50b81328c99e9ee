//! Storage layer for the ledger store
//!
//! - `codec`: snapshot (de)serialization
//! - `adapter`: key-value stores holding the serialized snapshot
//! - `file_io`: atomic file writes
//! - `seed`: demo data used when nothing usable is stored

pub mod adapter;
pub mod codec;
pub mod file_io;
pub mod seed;

pub use adapter::{open_store, DynSnapshotStore, FileStore, MemoryStore, NullStore, SnapshotStore};
pub use codec::{decode, encode};
pub use seed::{seed_snapshot, BILL_PAYMENT_CATEGORY};
