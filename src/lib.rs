//! Ledger Store - income, expense and bill tracking core
//!
//! This library owns the ledger data (transactions, bills, preferences and
//! the user identity), persists it as a single snapshot, and exposes
//! asynchronous operations with in-flight tracking so duplicate submissions
//! are rejected. Paying a bill always produces exactly one settling expense
//! transaction.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, bills, preferences, user)
//! - `storage`: Snapshot codec, store adapters and seed data
//! - `services`: Simulated backend and the bill payment workflow
//! - `state`: Subscribable state container with in-flight markers
//! - `reports`: Derived aggregates (totals, monthly series, goals, calendar)
//! - `export`: CSV, JSON and YAML export
//! - `display`, `cli`: Terminal front end
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ledger_store::services::{Latency, LedgerService};
//! use ledger_store::state::LedgerState;
//! use ledger_store::storage::MemoryStore;
//!
//! let service = LedgerService::new(Arc::new(MemoryStore::new("demo")), Latency::none());
//! let state = LedgerState::new(Arc::new(service));
//! state.refresh().await?;
//! let payment = state.pay_bill(&"b1".into(), None).await?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
