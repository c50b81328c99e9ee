//! Monthly income/expense series

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Money, Month, Transaction, TransactionKind};

/// Income and expense for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    pub month: Month,
    pub income: Money,
    pub expense: Money,
}

impl MonthlyPoint {
    fn empty(month: Month) -> Self {
        Self {
            month,
            income: Money::zero(),
            expense: Money::zero(),
        }
    }

    pub fn net(&self) -> Money {
        self.income - self.expense
    }

    pub fn label(&self) -> &'static str {
        self.month.short_label()
    }
}

/// The `months` calendar months ending with the month of `reference`,
/// oldest first; months without transactions are zero
pub fn monthly_series(
    transactions: &[Transaction],
    reference: NaiveDate,
    months: usize,
) -> Vec<MonthlyPoint> {
    let mut series: Vec<MonthlyPoint> = Month::containing(reference)
        .trailing(months)
        .into_iter()
        .map(MonthlyPoint::empty)
        .collect();

    let index: HashMap<Month, usize> = series
        .iter()
        .enumerate()
        .map(|(i, point)| (point.month, i))
        .collect();

    for txn in transactions {
        let Some(&i) = index.get(&Month::containing(txn.date)) else {
            continue;
        };
        match txn.kind {
            TransactionKind::Income => series[i].income += txn.amount,
            TransactionKind::Expense => series[i].expense += txn.amount,
        }
    }

    series
}
