//! Core data models for the ledger store
//!
//! Transactions, bills, preferences, the user identity and the snapshot
//! that bundles them for persistence.

pub mod bill;
pub mod ids;
pub mod money;
pub mod period;
pub mod preferences;
pub mod snapshot;
pub mod transaction;
pub mod user;

pub use bill::{Bill, BillStatus, BillTransitionError, BillValidationError, NewBill};
pub use ids::{BillId, TransactionId, UserId};
pub use money::Money;
pub use period::Month;
pub use preferences::{Preferences, ThemePreference};
pub use snapshot::{LinkViolation, Snapshot};
pub use transaction::{NewTransaction, Transaction, TransactionKind, TransactionValidationError};
pub use user::User;
