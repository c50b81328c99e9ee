//! Display formatting for terminal output
//!
//! Plain-text registers and tables for transactions, bills and reports.

pub mod bill;
pub mod report;
pub mod transaction;

pub use bill::{format_bill_details, format_bill_list, format_calendar};
pub use report::{format_bar, format_progress, separator, truncate};
pub use transaction::{
    format_transaction_details, format_transaction_register, format_transaction_row,
};
