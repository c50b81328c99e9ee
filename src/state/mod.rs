//! Reactive state container
//!
//! [`LedgerState`] mirrors the service's data for the presentation layer
//! and publishes every change through a `tokio::sync::watch` channel.
//! In-flight markers stop duplicate submissions while an action is
//! outstanding.

pub mod container;
pub mod in_flight;

pub use container::LedgerState;
pub use in_flight::InFlight;

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Bill, BillId, Money, Preferences, Transaction, TransactionKind, User};

/// Observable view of the ledger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    /// Newest date first
    pub transactions: Vec<Transaction>,
    /// Earliest due date first
    pub bills: Vec<Bill>,
    pub preferences: Preferences,
    pub user: Option<User>,
    /// True while any bulk fetch is outstanding
    pub loading: bool,
    /// Message from the last failed action
    pub error: Option<String>,
    pub last_sync: Option<DateTime<Utc>>,
    /// Kind of the transaction currently being submitted
    pub creating_transaction_kind: Option<TransactionKind>,
    /// Bills with a payment outstanding
    pub paying_bill_ids: BTreeSet<BillId>,
    pub(crate) fetches_in_flight: usize,
}

impl StoreState {
    pub fn find_bill(&self, id: &BillId) -> Option<&Bill> {
        self.bills.iter().find(|b| &b.id == id)
    }

    pub fn is_paying(&self, id: &BillId) -> bool {
        self.paying_bill_ids.contains(id)
    }

    pub fn is_creating_transaction(&self) -> bool {
        self.creating_transaction_kind.is_some()
    }

    pub fn pending_bills(&self) -> impl Iterator<Item = &Bill> {
        self.bills.iter().filter(|b| b.is_pending())
    }

    pub fn overdue_bills(&self, today: NaiveDate) -> impl Iterator<Item = &Bill> {
        self.bills.iter().filter(move |b| b.is_overdue(today))
    }

    pub fn pending_total(&self) -> Money {
        self.pending_bills().map(|b| b.amount).sum()
    }

    /// Insert or replace, keeping newest-first order
    pub(crate) fn upsert_transaction(&mut self, txn: Transaction) {
        if let Some(existing) = self.transactions.iter_mut().find(|t| t.id == txn.id) {
            *existing = txn;
            return;
        }
        let pos = self
            .transactions
            .iter()
            .position(|t| t.date < txn.date)
            .unwrap_or(self.transactions.len());
        self.transactions.insert(pos, txn);
    }

    /// Insert or replace, keeping earliest-due-first order
    pub(crate) fn upsert_bill(&mut self, bill: Bill) {
        if let Some(existing) = self.bills.iter_mut().find(|b| b.id == bill.id) {
            *existing = bill;
            return;
        }
        let pos = self
            .bills
            .iter()
            .position(|b| b.due_date > bill.due_date)
            .unwrap_or(self.bills.len());
        self.bills.insert(pos, bill);
    }
}
