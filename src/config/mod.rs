//! Configuration for the ledger store
//!
//! - Path resolution for the data directory
//! - User settings persisted as `config.json`

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{LatencySettings, Settings};
