//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the ledger state container.

pub mod bill;
pub mod export;
pub mod profile;
pub mod report;
pub mod transaction;

pub use bill::{handle_bill_command, BillCommands};
pub use export::{handle_export_command, ExportFormat};
pub use profile::{handle_theme_command, handle_user_command, UserCommands};
pub use report::{handle_calendar_command, handle_check_command, handle_summary_command};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;

/// Parse a date in the configured format, falling back to ISO `YYYY-MM-DD`
pub fn parse_date(input: &str, format: &str) -> LedgerResult<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, format)
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))
        .map_err(|_| {
            LedgerError::Validation(format!(
                "Invalid date format: '{}'. Use YYYY-MM-DD",
                input
            ))
        })
}

/// Parse an optional date, defaulting to today
pub fn parse_date_or_today(input: Option<&str>, format: &str) -> LedgerResult<NaiveDate> {
    match input {
        Some(s) => parse_date(s, format),
        None => Ok(Local::now().date_naive()),
    }
}

/// Payment timestamp for a calendar date (noon UTC)
pub fn payment_time(date: NaiveDate) -> LedgerResult<DateTime<Utc>> {
    date.and_hms_opt(12, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| LedgerError::Validation(format!("Invalid payment date: {}", date)))
}

pub fn parse_amount(input: &str) -> LedgerResult<Money> {
    Money::parse(input).map_err(|e| {
        LedgerError::Validation(format!(
            "Invalid amount format: '{}'. Use a format like '189.90' or '100'. Error: {}",
            input, e
        ))
    })
}
