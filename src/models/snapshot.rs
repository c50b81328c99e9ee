//! The ledger snapshot
//!
//! A snapshot is the unit of persistence: every write replaces the whole
//! thing. It also carries the bill-linkage check used by tests and the
//! `check` command.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::bill::Bill;
use super::ids::{BillId, TransactionId};
use super::preferences::Preferences;
use super::transaction::Transaction;
use super::user::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub updated_at: DateTime<Utc>,
}

impl Snapshot {
    /// An empty ledger stamped with `now`
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            transactions: Vec::new(),
            bills: Vec::new(),
            preferences: Preferences::default(),
            user: None,
            updated_at: now,
        }
    }

    /// Record that the snapshot changed
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn find_bill(&self, id: &BillId) -> Option<&Bill> {
        self.bills.iter().find(|b| &b.id == id)
    }

    pub fn find_bill_mut(&mut self, id: &BillId) -> Option<&mut Bill> {
        self.bills.iter_mut().find(|b| &b.id == id)
    }

    pub fn find_transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| &t.id == id)
    }

    /// Every breach of the bill-linkage invariant
    ///
    /// A paid bill needs exactly one transaction with `bill_id == bill.id`,
    /// matching amount and account, referenced by `bill.transaction_id`.
    /// A pending bill must have no settling transaction.
    pub fn link_violations(&self) -> Vec<LinkViolation> {
        let mut violations = Vec::new();

        for bill in &self.bills {
            let settling: Vec<&Transaction> = self
                .transactions
                .iter()
                .filter(|t| t.bill_id.as_ref() == Some(&bill.id))
                .collect();

            if bill.is_pending() {
                if !settling.is_empty() {
                    violations.push(LinkViolation::PendingBillSettled(bill.id.clone()));
                }
                continue;
            }

            match settling.as_slice() {
                [] => violations.push(LinkViolation::MissingTransaction(bill.id.clone())),
                [txn] => {
                    if bill.transaction_id.as_ref() != Some(&txn.id) {
                        violations.push(LinkViolation::WrongReference(bill.id.clone()));
                    }
                    if txn.amount != bill.amount || txn.account != bill.account {
                        violations.push(LinkViolation::Mismatch(bill.id.clone()));
                    }
                }
                _ => violations.push(LinkViolation::DuplicateTransactions(
                    bill.id.clone(),
                    settling.len(),
                )),
            }
        }

        for txn in &self.transactions {
            if let Some(bill_id) = &txn.bill_id {
                if self.find_bill(bill_id).is_none() {
                    violations.push(LinkViolation::UnknownBill(txn.id.clone(), bill_id.clone()));
                }
            }
        }

        violations
    }
}

/// A single breach of the bill-linkage invariant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkViolation {
    MissingTransaction(BillId),
    DuplicateTransactions(BillId, usize),
    WrongReference(BillId),
    Mismatch(BillId),
    PendingBillSettled(BillId),
    UnknownBill(TransactionId, BillId),
}

impl fmt::Display for LinkViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTransaction(bill) => {
                write!(f, "Paid bill {} has no settling transaction", bill)
            }
            Self::DuplicateTransactions(bill, count) => {
                write!(f, "Bill {} has {} settling transactions", bill, count)
            }
            Self::WrongReference(bill) => {
                write!(f, "Bill {} does not reference its settling transaction", bill)
            }
            Self::Mismatch(bill) => write!(
                f,
                "Settling transaction for bill {} differs in amount or account",
                bill
            ),
            Self::PendingBillSettled(bill) => {
                write!(f, "Pending bill {} already has a settling transaction", bill)
            }
            Self::UnknownBill(txn, bill) => {
                write!(f, "Transaction {} references unknown bill {}", txn, bill)
            }
        }
    }
}
