//! Demo seed data
//!
//! Used on first run and whenever the stored snapshot is missing or
//! unreadable. Dates are relative to `today` so the demo always has bills
//! coming due. The seed satisfies the bill-linkage invariant.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::{
    Bill, BillId, BillStatus, Money, Month, Preferences, Snapshot, Transaction, TransactionId,
    TransactionKind,
};

/// Category recorded on transactions created by paying a bill
pub const BILL_PAYMENT_CATEGORY: &str = "Bill payment";

/// Build the seed snapshot
pub fn seed_snapshot(today: NaiveDate, now: DateTime<Utc>) -> Snapshot {
    let this_month = Month::containing(today).start_date();
    let last_month = Month::containing(today).prev().start_date();
    let yesterday = today - Duration::days(1);
    let paid_at = midday(yesterday).unwrap_or(now);

    let transactions = vec![
        txn("t1", TransactionKind::Income, "Salary", 520_000, this_month, "Monthly salary", "Main", now),
        txn("t2", TransactionKind::Expense, "Groceries", 38_450, today - Duration::days(2), "Weekly groceries", "Main", now),
        txn("t3", TransactionKind::Income, "Freelance", 145_000, last_month + Duration::days(14), "Landing page project", "Main", now),
        txn("t4", TransactionKind::Expense, "Rent", 210_000, last_month + Duration::days(4), "Apartment rent", "Main", now),
        Transaction {
            bill_id: Some(BillId::from("b3")),
            ..txn(
                "t5",
                TransactionKind::Expense,
                BILL_PAYMENT_CATEGORY,
                5_990,
                yesterday,
                "Payment of Platform subscription",
                "Corporate card",
                now,
            )
        },
    ];

    let bills = vec![
        bill("b1", "Electricity", 18_990, today + Duration::days(3), "Main"),
        bill("b2", "Fiber internet", 12_990, today + Duration::days(5), "Main"),
        Bill {
            status: BillStatus::Paid,
            paid_at: Some(paid_at),
            transaction_id: Some(TransactionId::from("t5")),
            ..bill("b3", "Platform subscription", 5_990, yesterday, "Corporate card")
        },
    ];

    Snapshot {
        transactions,
        bills,
        preferences: Preferences::default(),
        user: None,
        updated_at: now,
    }
}

fn midday(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(12, 0, 0).map(|dt| dt.and_utc())
}

#[allow(clippy::too_many_arguments)]
fn txn(
    id: &str,
    kind: TransactionKind,
    category: &str,
    cents: i64,
    date: NaiveDate,
    description: &str,
    account: &str,
    now: DateTime<Utc>,
) -> Transaction {
    Transaction {
        id: TransactionId::from(id),
        kind,
        category: category.to_string(),
        amount: Money::from_cents(cents),
        date,
        description: description.to_string(),
        account: account.to_string(),
        bill_id: None,
        created_at: now,
        updated_at: None,
    }
}

fn bill(id: &str, description: &str, cents: i64, due_date: NaiveDate, account: &str) -> Bill {
    Bill {
        id: BillId::from(id),
        description: description.to_string(),
        amount: Money::from_cents(cents),
        due_date,
        status: BillStatus::Pending,
        account: account.to_string(),
        paid_at: None,
        transaction_id: None,
        notes: None,
    }
}
