//! Transaction display formatting
//!
//! Register views for the terminal.

use super::report::truncate;
use crate::models::{Transaction, TransactionKind};

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, symbol: &str) -> String {
    let (sign, bill_marker) = match (txn.kind, txn.settles_bill()) {
        (TransactionKind::Income, _) => ("+", ""),
        (TransactionKind::Expense, false) => ("-", ""),
        (TransactionKind::Expense, true) => ("-", " [bill]"),
    };

    format!(
        "{} {:<16} {:<24} {:<14} {}{:>11}{}",
        txn.date.format("%Y-%m-%d"),
        truncate(&txn.category, 16),
        truncate(&txn.description, 24),
        truncate(&txn.account, 14),
        sign,
        txn.amount.format_with_symbol(symbol),
        bill_marker
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:10} {:<16} {:<24} {:<14} {:>12}\n",
        "Date", "Category", "Description", "Account", "Amount"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, symbol));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Kind:        {}\n", txn.kind));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Account:     {}\n", txn.account));

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }
    if let Some(bill_id) = &txn.bill_id {
        output.push_str(&format!("Settles:     bill {}\n", bill_id));
    }

    output
}
