//! Income, expense and balance totals

use serde::Serialize;

use crate::models::{Money, Transaction, TransactionKind};

/// Sums over a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
    /// `income - expense`
    pub balance: Money,
}

impl Totals {
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut totals = Self::default();
        for txn in transactions {
            totals.record(txn);
        }
        totals
    }

    /// Fold one transaction into the totals
    pub fn record(&mut self, txn: &Transaction) {
        match txn.kind {
            TransactionKind::Income => self.income += txn.amount,
            TransactionKind::Expense => self.expense += txn.amount,
        }
        self.balance = self.income - self.expense;
    }
}
