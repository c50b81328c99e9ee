//! CSV export of transactions and bills

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Bill, Money, Transaction};

fn export_err(e: impl std::fmt::Display) -> LedgerError {
    LedgerError::Export(e.to_string())
}

fn decimal(amount: Money) -> String {
    amount.format_with_symbol("")
}

/// Export transactions to CSV in the order given
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> LedgerResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);

    csv.write_record([
        "ID",
        "Date",
        "Kind",
        "Category",
        "Description",
        "Account",
        "Amount",
        "Bill ID",
    ])
    .map_err(export_err)?;

    for txn in transactions {
        let date = txn.date.to_string();
        let amount = decimal(txn.amount);
        csv.write_record([
            txn.id.as_str(),
            date.as_str(),
            txn.kind.as_str(),
            txn.category.as_str(),
            txn.description.as_str(),
            txn.account.as_str(),
            amount.as_str(),
            txn.bill_id.as_ref().map(|id| id.as_str()).unwrap_or(""),
        ])
        .map_err(export_err)?;
    }

    csv.flush().map_err(export_err)
}

/// Export bills to CSV in the order given
pub fn export_bills_csv<W: Write>(bills: &[Bill], writer: W) -> LedgerResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);

    csv.write_record([
        "ID",
        "Due Date",
        "Description",
        "Account",
        "Amount",
        "Status",
        "Paid At",
        "Transaction ID",
        "Notes",
    ])
    .map_err(export_err)?;

    for bill in bills {
        let due = bill.due_date.to_string();
        let amount = decimal(bill.amount);
        let status = bill.status.to_string();
        let paid_at = bill.paid_at.map(|t| t.to_rfc3339()).unwrap_or_default();
        csv.write_record([
            bill.id.as_str(),
            due.as_str(),
            bill.description.as_str(),
            bill.account.as_str(),
            amount.as_str(),
            status.as_str(),
            paid_at.as_str(),
            bill.transaction_id.as_ref().map(|id| id.as_str()).unwrap_or(""),
            bill.notes.as_deref().unwrap_or(""),
        ])
        .map_err(export_err)?;
    }

    csv.flush().map_err(export_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seed_snapshot;
    use chrono::{NaiveDate, Utc};

    fn seed() -> crate::models::Snapshot {
        seed_snapshot(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(), Utc::now())
    }

    #[test]
    fn test_export_transactions_csv() {
        let snapshot = seed();
        let mut output = Vec::new();
        export_transactions_csv(&snapshot.transactions, &mut output).unwrap();

        let csv_string = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv_string.lines().collect();
        assert_eq!(
            lines[0],
            "ID,Date,Kind,Category,Description,Account,Amount,Bill ID"
        );
        assert_eq!(lines.len(), snapshot.transactions.len() + 1);
        assert!(csv_string.contains("t5,2025-06-14,expense,Bill payment,Payment of Platform subscription,Corporate card,59.90,b3"));
    }

    #[test]
    fn test_export_bills_csv_quotes_fields() {
        let mut snapshot = seed();
        snapshot.bills[0].description = "Water, sewer".into();

        let mut output = Vec::new();
        export_bills_csv(&snapshot.bills, &mut output).unwrap();
        let csv_string = String::from_utf8(output).unwrap();

        assert!(csv_string.contains("\"Water, sewer\""));
        assert!(csv_string.contains("b3,2025-06-14,Platform subscription,Corporate card,59.90,Paid,"));
    }
}
