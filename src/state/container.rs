//! The ledger state container

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::in_flight::InFlight;
use super::StoreState;
use crate::error::LedgerResult;
use crate::models::{
    Bill, BillId, NewBill, NewTransaction, Preferences, ThemePreference, Transaction, User,
};
use crate::services::{BillPayment, BillPaymentWorkflow, LedgerService};

/// Subscribable mirror of the ledger with action methods
///
/// Actions call the service, then reconcile the affected entities into the
/// published state without refetching. Failures set `error` and leave the
/// local entities as they were.
#[derive(Debug)]
pub struct LedgerState {
    service: Arc<LedgerService>,
    state: watch::Sender<StoreState>,
}

impl LedgerState {
    pub fn new(service: Arc<LedgerService>) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self { service, state }
    }

    pub fn service(&self) -> &Arc<LedgerService> {
        &self.service
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Copy of the current state
    pub fn current(&self) -> StoreState {
        self.state.borrow().clone()
    }

    pub async fn fetch_transactions(&self) -> LedgerResult<Vec<Transaction>> {
        let _loading = InFlight::fetch(&self.state);
        let result = self.service.list_transactions().await;
        self.settle(result, |s, txns| s.transactions = txns.clone())
    }

    pub async fn fetch_bills(&self) -> LedgerResult<Vec<Bill>> {
        let _loading = InFlight::fetch(&self.state);
        let result = self.service.list_bills().await;
        self.settle(result, |s, bills| s.bills = bills.clone())
    }

    pub async fn fetch_user(&self) -> LedgerResult<Option<User>> {
        let _loading = InFlight::fetch(&self.state);
        let result = self.service.get_user().await;
        self.settle(result, |s, user| s.user = user.clone())
    }

    pub async fn fetch_preferences(&self) -> LedgerResult<Preferences> {
        let _loading = InFlight::fetch(&self.state);
        let result = self.service.get_preferences().await;
        self.settle(result, |s, prefs| s.preferences = *prefs)
    }

    /// Fetch everything concurrently
    pub async fn refresh(&self) -> LedgerResult<()> {
        let (transactions, bills, user, preferences) = tokio::join!(
            self.fetch_transactions(),
            self.fetch_bills(),
            self.fetch_user(),
            self.fetch_preferences(),
        );
        transactions?;
        bills?;
        user?;
        preferences?;
        Ok(())
    }

    /// Submit a new transaction; only one submission may be outstanding
    pub async fn create_transaction(&self, input: NewTransaction) -> LedgerResult<Transaction> {
        let _creating = InFlight::create_transaction(&self.state, input.kind)?;
        let result = self.service.add_transaction(input).await;
        self.settle(result, |s, txn| s.upsert_transaction(txn.clone()))
    }

    pub async fn add_bill(&self, input: NewBill) -> LedgerResult<Bill> {
        let result = self.service.add_bill(input).await;
        self.settle(result, |s, bill| s.upsert_bill(bill.clone()))
    }

    /// Pay a bill through [`BillPaymentWorkflow`]
    pub async fn pay_bill(
        &self,
        id: &BillId,
        paid_at: Option<DateTime<Utc>>,
    ) -> LedgerResult<BillPayment> {
        BillPaymentWorkflow::new(self).pay(id, paid_at).await
    }

    pub async fn save_user(&self, user: User) -> LedgerResult<User> {
        let result = self.service.replace_user(user).await;
        self.settle(result, |s, user| s.user = Some(user.clone()))
    }

    /// Save the user derived from the stored one
    pub async fn save_user_with<F>(&self, updater: F) -> LedgerResult<User>
    where
        F: FnOnce(Option<User>) -> User,
    {
        let result = self.service.update_user(updater).await;
        self.settle(result, |s, user| s.user = Some(user.clone()))
    }

    pub async fn set_theme(&self, theme: ThemePreference) -> LedgerResult<Preferences> {
        let result = self.service.set_theme_preference(theme).await;
        self.settle(result, |s, prefs| s.preferences = *prefs)
    }

    /// Drop the last error; no-op when there is none
    pub fn clear_error(&self) {
        self.state.send_if_modified(|s| s.error.take().is_some());
    }

    /// Reset the ledger to seed data and reload
    pub async fn reset(&self) -> LedgerResult<()> {
        let result = self.service.reset().await;
        self.settle(result, |s, _| {
            s.transactions.clear();
            s.bills.clear();
            s.user = None;
            s.preferences = Preferences::default();
            s.error = None;
        })?;
        self.refresh().await
    }

    /// Claim the payment marker for `id`
    pub(crate) fn begin_bill_payment(&self, id: &BillId) -> LedgerResult<InFlight<'_>> {
        InFlight::pay_bill(&self.state, id)
    }

    pub(crate) fn local_bill(&self, id: &BillId) -> Option<Bill> {
        self.state.borrow().find_bill(id).cloned()
    }

    pub(crate) fn settle_payment(
        &self,
        result: LedgerResult<BillPayment>,
    ) -> LedgerResult<BillPayment> {
        self.settle(result, |s, payment| {
            s.upsert_bill(payment.bill.clone());
            if let Some(txn) = &payment.transaction {
                s.upsert_transaction(txn.clone());
            }
        })
    }

    /// Publish a service result
    fn settle<T>(
        &self,
        result: LedgerResult<T>,
        apply: impl FnOnce(&mut StoreState, &T),
    ) -> LedgerResult<T> {
        match result {
            Ok(value) => {
                self.state.send_modify(|s| {
                    apply(s, &value);
                    s.last_sync = Some(Utc::now());
                });
                Ok(value)
            }
            Err(e) => {
                if e.is_unexpected() {
                    warn!(error = %e, "ledger action failed");
                } else {
                    debug!(error = %e, "ledger action rejected");
                }
                let message = e.user_message();
                self.state.send_modify(|s| s.error = Some(message));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::models::{Money, TransactionKind};
    use crate::reports::Totals;
    use crate::services::Latency;
    use crate::storage::{MemoryStore, SnapshotStore};
    use chrono::NaiveDate;

    fn state_with(latency: Latency) -> LedgerState {
        let store = MemoryStore::new("ledger-test");
        LedgerState::new(Arc::new(LedgerService::new(Arc::new(store), latency)))
    }

    fn income(cents: i64) -> NewTransaction {
        NewTransaction::new(
            TransactionKind::Income,
            "Salary",
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            "Main",
        )
    }

    #[derive(Debug)]
    struct BrokenStore;

    impl SnapshotStore for BrokenStore {
        fn load(&self) -> LedgerResult<Option<String>> {
            Err(LedgerError::Storage("medium unplugged".into()))
        }

        fn save(&self, _raw: &str) -> LedgerResult<()> {
            Err(LedgerError::Storage("medium unplugged".into()))
        }

        fn clear(&self) -> LedgerResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_refresh_populates_state() {
        let state = state_with(Latency::none());
        let mut rx = state.subscribe();

        state.refresh().await.unwrap();

        assert!(rx.has_changed().unwrap());
        let current = rx.borrow_and_update().clone();
        assert_eq!(current.bills.len(), 3);
        assert!(!current.transactions.is_empty());
        assert!(!current.loading);
        assert!(current.last_sync.is_some());
        assert!(current.error.is_none());
    }

    #[tokio::test]
    async fn test_loading_is_visible_during_fetch() {
        let state = state_with(Latency::fixed(20));
        let rx = state.subscribe();

        let fetch = state.fetch_bills();
        tokio::pin!(fetch);
        tokio::select! {
            biased;
            _ = &mut fetch => panic!("fetch finished before the latency elapsed"),
            _ = tokio::task::yield_now() => {}
        }
        assert!(rx.borrow().loading);

        fetch.await.unwrap();
        assert!(!rx.borrow().loading);
    }

    #[tokio::test]
    async fn test_create_transaction_reconciles_without_refetch() {
        let state = state_with(Latency::none());
        let txn = state.create_transaction(income(250_000)).await.unwrap();

        let current = state.current();
        assert_eq!(current.transactions, vec![txn]);
        assert_eq!(current.creating_transaction_kind, None);
    }

    #[tokio::test]
    async fn test_concurrent_submission_is_rejected() {
        let state = state_with(Latency::fixed(10));

        let (first, second) = tokio::join!(
            state.create_transaction(income(100)),
            state.create_transaction(income(200)),
        );

        assert!(first.is_ok());
        assert!(second.unwrap_err().is_in_flight());
        assert_eq!(state.current().creating_transaction_kind, None);

        let stored = state.service().list_transactions().await.unwrap();
        let submitted = stored
            .iter()
            .filter(|t| t.category == "Salary" && t.amount.cents() < 1_000)
            .count();
        assert_eq!(submitted, 1);
    }

    #[tokio::test]
    async fn test_failure_sets_error_and_keeps_entities() {
        let state = state_with(Latency::none());
        state.refresh().await.unwrap();
        let before = state.current();

        let err = state.create_transaction(income(0)).await.unwrap_err();
        assert!(err.is_validation());

        let after = state.current();
        assert_eq!(after.transactions, before.transactions);
        assert_eq!(after.error, Some(err.user_message()));
        assert_eq!(after.creating_transaction_kind, None);

        state.clear_error();
        assert!(state.current().error.is_none());
        state.clear_error();
        assert!(state.current().error.is_none());
    }

    #[tokio::test]
    async fn test_storage_failure_shows_generic_message() {
        let service = LedgerService::new(Arc::new(BrokenStore), Latency::none());
        let state = LedgerState::new(Arc::new(service));

        assert!(state.fetch_bills().await.is_err());
        let current = state.current();
        assert_eq!(
            current.error.as_deref(),
            Some(crate::error::GENERIC_FAILURE_MESSAGE)
        );
        assert!(!current.loading);
    }

    #[tokio::test]
    async fn test_set_theme_and_save_user() {
        let state = state_with(Latency::none());
        state.set_theme(ThemePreference::Dark).await.unwrap();
        state
            .save_user(User::new("u1", "Grace", "grace@example.com"))
            .await
            .unwrap();

        let current = state.current();
        assert_eq!(current.preferences.theme, ThemePreference::Dark);
        assert_eq!(current.user.unwrap().name, "Grace");
    }

    #[tokio::test]
    async fn test_save_user_with_updater() {
        let state = state_with(Latency::none());
        state
            .save_user(User::new("u1", "Grace", "grace@example.com"))
            .await
            .unwrap();

        let saved = state
            .save_user_with(|current| {
                let mut user = current.unwrap();
                user.name = "Grace H.".into();
                user
            })
            .await
            .unwrap();

        assert_eq!(saved.id.as_str(), "u1");
        assert_eq!(saved.email, "grace@example.com");
        assert_eq!(state.current().user, Some(saved));
    }

    #[tokio::test]
    async fn test_pay_bill_adds_amount_to_expense() {
        let state = state_with(Latency::none());
        state.refresh().await.unwrap();
        let before = Totals::from_transactions(&state.current().transactions);

        state.pay_bill(&BillId::from("b1"), None).await.unwrap();

        let after = Totals::from_transactions(&state.current().transactions);
        assert_eq!(after.expense.cents(), before.expense.cents() + 18_990);
        assert_eq!(after.income, before.income);
        assert_eq!(after.balance.cents(), before.balance.cents() - 18_990);
    }

    #[tokio::test]
    async fn test_reset_reloads_seed() {
        let state = state_with(Latency::none());
        state.create_transaction(income(100)).await.unwrap();
        state.set_theme(ThemePreference::Light).await.unwrap();

        state.reset().await.unwrap();

        let current = state.current();
        assert_eq!(current.preferences.theme, ThemePreference::System);
        assert_eq!(current.bills.len(), 3);
        assert!(!current.transactions.iter().any(|t| t.amount.cents() == 100));
    }
}
