//! Service layer for the ledger store
//!
//! The service layer is the simulated backend: latency, validation and
//! atomic persistence of the snapshot. The bill payment workflow builds on
//! the state container to add duplicate-submission protection.

pub mod bill_payment;
pub mod latency;
pub mod ledger;

pub use bill_payment::BillPaymentWorkflow;
pub use latency::Latency;
pub use ledger::{sorted_bills, sorted_transactions, BillPayment, LedgerService};
