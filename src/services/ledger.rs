//! Ledger service
//!
//! The simulated backend. Each operation waits out the configured latency,
//! then runs read-mutate-persist on the whole snapshot inside one critical
//! section. A failed mutation or a failed save leaves both the cache and
//! the stored copy untouched.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Local, Utc};
use tracing::{debug, info, warn};

use super::latency::Latency;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Bill, BillId, NewBill, NewTransaction, Preferences, Snapshot, ThemePreference, Transaction,
    TransactionId, TransactionKind, User,
};
use crate::storage::{codec, seed_snapshot, DynSnapshotStore, BILL_PAYMENT_CATEGORY};

/// Result of paying a bill
///
/// `transaction` is `None` when the bill was already paid and nothing
/// changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillPayment {
    pub bill: Bill,
    pub transaction: Option<Transaction>,
}

impl BillPayment {
    /// True when this call recorded the payment
    pub fn newly_paid(&self) -> bool {
        self.transaction.is_some()
    }
}

/// Outcome of a snapshot mutation
enum Mutation<T> {
    /// Snapshot changed; stamp and persist it
    Changed(T),
    /// Nothing to write
    Unchanged(T),
}

/// Asynchronous ledger backend over a snapshot store
#[derive(Debug)]
pub struct LedgerService {
    store: DynSnapshotStore,
    cache: Mutex<Option<Snapshot>>,
    latency: Latency,
}

impl LedgerService {
    pub fn new(store: DynSnapshotStore, latency: Latency) -> Self {
        Self {
            store,
            cache: Mutex::new(None),
            latency,
        }
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    /// Whether writes survive the process
    pub fn is_durable(&self) -> bool {
        self.store.is_durable()
    }

    /// All transactions, newest date first (ties keep insertion order)
    pub async fn list_transactions(&self) -> LedgerResult<Vec<Transaction>> {
        self.latency.pause().await;
        debug!("listing transactions");
        self.read(|snapshot| sorted_transactions(&snapshot.transactions))
    }

    /// Record a new transaction
    pub async fn add_transaction(&self, input: NewTransaction) -> LedgerResult<Transaction> {
        self.latency.pause().await;
        debug!(kind = %input.kind, category = %input.category, "adding transaction");

        input
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.mutate(|snapshot, now| {
            if let Some(id) = &input.id {
                if snapshot.find_transaction(id).is_some() {
                    return Err(LedgerError::Validation(format!(
                        "Transaction id '{}' is already in use",
                        id
                    )));
                }
            }

            let date = input
                .date
                .ok_or_else(|| LedgerError::Validation("Transaction date is required".into()))?;
            let txn = input.into_transaction(date, now);
            snapshot.transactions.push(txn.clone());
            Ok(Mutation::Changed(txn))
        })
    }

    /// All bills, earliest due date first (ties keep insertion order)
    pub async fn list_bills(&self) -> LedgerResult<Vec<Bill>> {
        self.latency.pause().await;
        debug!("listing bills");
        self.read(|snapshot| sorted_bills(&snapshot.bills))
    }

    /// Register a new pending bill
    pub async fn add_bill(&self, input: NewBill) -> LedgerResult<Bill> {
        self.latency.pause().await;
        debug!(description = %input.description, "adding bill");

        input
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.mutate(|snapshot, _now| {
            if let Some(id) = &input.id {
                if snapshot.find_bill(id).is_some() {
                    return Err(LedgerError::Validation(format!(
                        "Bill id '{}' is already in use",
                        id
                    )));
                }
            }

            let due_date = input
                .due_date
                .ok_or_else(|| LedgerError::Validation("Bill due date is required".into()))?;
            let bill = input.into_bill(due_date);
            snapshot.bills.push(bill.clone());
            Ok(Mutation::Changed(bill))
        })
    }

    /// Pay a bill, creating its settling expense transaction
    ///
    /// Paying an already-paid bill returns it unchanged with no
    /// transaction, so repeated calls never duplicate the expense.
    pub async fn mark_bill_paid(
        &self,
        id: &BillId,
        paid_at: Option<DateTime<Utc>>,
    ) -> LedgerResult<BillPayment> {
        self.latency.pause().await;
        debug!(bill_id = %id, "marking bill paid");

        let payment = self.mutate(|snapshot, now| {
            let bill = snapshot
                .find_bill(id)
                .ok_or_else(|| LedgerError::bill_not_found(id.as_str()))?;

            if bill.is_paid() {
                return Ok(Mutation::Unchanged(BillPayment {
                    bill: bill.clone(),
                    transaction: None,
                }));
            }

            let paid_at = paid_at.unwrap_or(now);
            let txn = settling_transaction(bill, paid_at, now);

            let bill = snapshot
                .find_bill_mut(id)
                .ok_or_else(|| LedgerError::bill_not_found(id.as_str()))?;
            bill.mark_paid(txn.id.clone(), paid_at)
                .map_err(|e| LedgerError::Validation(e.to_string()))?;
            let bill = bill.clone();

            snapshot.transactions.push(txn.clone());
            Ok(Mutation::Changed(BillPayment {
                bill,
                transaction: Some(txn),
            }))
        })?;

        if let Some(txn) = &payment.transaction {
            info!(
                bill_id = %payment.bill.id,
                transaction_id = %txn.id,
                amount = %txn.amount,
                "bill paid"
            );
        } else {
            debug!(bill_id = %id, "bill already paid; nothing recorded");
        }

        Ok(payment)
    }

    pub async fn get_user(&self) -> LedgerResult<Option<User>> {
        self.latency.pause().await;
        debug!("reading user");
        self.read(|snapshot| snapshot.user.clone())
    }

    /// Derive the stored user from the current one
    pub async fn update_user<F>(&self, updater: F) -> LedgerResult<User>
    where
        F: FnOnce(Option<User>) -> User,
    {
        self.latency.pause().await;
        debug!("updating user");

        self.mutate(|snapshot, _now| {
            let user = updater(snapshot.user.clone());
            validate_user(&user)?;
            snapshot.user = Some(user.clone());
            Ok(Mutation::Changed(user))
        })
    }

    pub async fn replace_user(&self, user: User) -> LedgerResult<User> {
        self.update_user(move |_| user).await
    }

    pub async fn get_preferences(&self) -> LedgerResult<Preferences> {
        self.latency.pause().await;
        debug!("reading preferences");
        self.read(|snapshot| snapshot.preferences)
    }

    pub async fn set_theme_preference(&self, theme: ThemePreference) -> LedgerResult<Preferences> {
        self.latency.pause().await;
        debug!(%theme, "setting theme preference");

        self.mutate(|snapshot, _now| {
            snapshot.preferences.theme = theme;
            Ok(Mutation::Changed(snapshot.preferences))
        })
    }

    /// Full copy of the current snapshot
    pub async fn snapshot(&self) -> LedgerResult<Snapshot> {
        self.latency.pause().await;
        debug!("reading full snapshot");
        self.read(Snapshot::clone)
    }

    /// Forget the cached and stored snapshot; the next read starts from seed
    pub async fn reset(&self) -> LedgerResult<()> {
        self.latency.pause().await;
        info!("resetting ledger");

        let mut cache = self.lock_cache()?;
        self.store.clear()?;
        *cache = None;
        Ok(())
    }

    fn lock_cache(&self) -> LedgerResult<MutexGuard<'_, Option<Snapshot>>> {
        self.cache
            .lock()
            .map_err(|e| LedgerError::Unexpected(format!("Ledger cache lock poisoned: {}", e)))
    }

    /// Cached snapshot, loading from the store (or seed) on first use
    fn current<'a>(&self, cache: &'a mut Option<Snapshot>) -> LedgerResult<&'a mut Snapshot> {
        if cache.is_none() {
            *cache = Some(self.load()?);
        }
        cache
            .as_mut()
            .ok_or_else(|| LedgerError::Unexpected("Ledger cache is empty".into()))
    }

    fn load(&self) -> LedgerResult<Snapshot> {
        let seed = || seed_snapshot(Local::now().date_naive(), Utc::now());

        match self.store.load()? {
            None => {
                debug!("no stored ledger; starting from seed data");
                Ok(seed())
            }
            Some(raw) => match codec::decode(&raw) {
                Ok(snapshot) => Ok(snapshot),
                Err(e) => {
                    warn!(error = %e, "stored ledger is unreadable; starting from seed data");
                    Ok(seed())
                }
            },
        }
    }

    fn read<T>(&self, f: impl FnOnce(&Snapshot) -> T) -> LedgerResult<T> {
        let mut cache = self.lock_cache()?;
        let snapshot = self.current(&mut cache)?;
        Ok(f(snapshot))
    }

    /// Apply `f` to a working copy, then persist and publish it
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Snapshot, DateTime<Utc>) -> LedgerResult<Mutation<T>>,
    ) -> LedgerResult<T> {
        let mut cache = self.lock_cache()?;
        let mut working = self.current(&mut cache)?.clone();
        let now = Utc::now();

        match f(&mut working, now)? {
            Mutation::Unchanged(value) => Ok(value),
            Mutation::Changed(value) => {
                working.touch(now);
                let raw = codec::encode(&working)?;
                self.store.save(&raw)?;
                *cache = Some(working);
                Ok(value)
            }
        }
    }
}

/// Expense transaction recording a bill's payment, dated on the local
/// calendar day of `paid_at`
fn settling_transaction(bill: &Bill, paid_at: DateTime<Utc>, now: DateTime<Utc>) -> Transaction {
    Transaction {
        id: TransactionId::new(),
        kind: TransactionKind::Expense,
        category: BILL_PAYMENT_CATEGORY.to_string(),
        amount: bill.amount,
        date: paid_at.with_timezone(&Local).date_naive(),
        description: format!("Payment of {}", bill.description),
        account: bill.account.clone(),
        bill_id: Some(bill.id.clone()),
        created_at: now,
        updated_at: Some(now),
    }
}

/// The user record is owned by the auth side; only its id is checked
fn validate_user(user: &User) -> LedgerResult<()> {
    if user.id.is_blank() {
        return Err(LedgerError::Validation("User id must not be blank".into()));
    }
    Ok(())
}

/// Newest date first; the sort is stable so equal dates keep insertion order
pub fn sorted_transactions(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Earliest due date first; stable
pub fn sorted_bills(bills: &[Bill]) -> Vec<Bill> {
    let mut sorted = bills.to_vec();
    sorted.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    sorted
}
