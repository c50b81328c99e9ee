//! In-flight markers
//!
//! A marker is set in the published state when an action starts and
//! cleared when its guard drops, whichever way the action ends.

use tokio::sync::watch;

use super::StoreState;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{BillId, TransactionKind};

#[derive(Debug)]
enum Marker {
    Fetch,
    CreateTransaction,
    PayBill(BillId),
}

/// Guard holding one in-flight marker
#[derive(Debug)]
#[must_use = "the marker is released as soon as the guard is dropped"]
pub struct InFlight<'a> {
    state: &'a watch::Sender<StoreState>,
    marker: Marker,
}

impl<'a> InFlight<'a> {
    /// Count a bulk fetch; any number may run at once
    pub(crate) fn fetch(state: &'a watch::Sender<StoreState>) -> Self {
        state.send_modify(|s| {
            s.fetches_in_flight += 1;
            s.loading = true;
        });
        Self {
            state,
            marker: Marker::Fetch,
        }
    }

    /// Claim the single transaction-submission slot
    pub(crate) fn create_transaction(
        state: &'a watch::Sender<StoreState>,
        kind: TransactionKind,
    ) -> LedgerResult<Self> {
        let acquired = state.send_if_modified(|s| {
            if s.creating_transaction_kind.is_some() {
                return false;
            }
            s.creating_transaction_kind = Some(kind);
            true
        });

        if !acquired {
            return Err(LedgerError::transaction_in_flight(kind.as_str()));
        }
        Ok(Self {
            state,
            marker: Marker::CreateTransaction,
        })
    }

    /// Claim the payment marker for one bill
    pub(crate) fn pay_bill(
        state: &'a watch::Sender<StoreState>,
        id: &BillId,
    ) -> LedgerResult<Self> {
        let acquired = state.send_if_modified(|s| s.paying_bill_ids.insert(id.clone()));

        if !acquired {
            return Err(LedgerError::bill_in_flight(id.as_str()));
        }
        Ok(Self {
            state,
            marker: Marker::PayBill(id.clone()),
        })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let marker = &self.marker;
        self.state.send_modify(|s| match marker {
            Marker::Fetch => {
                s.fetches_in_flight = s.fetches_in_flight.saturating_sub(1);
                s.loading = s.fetches_in_flight > 0;
            }
            Marker::CreateTransaction => s.creating_transaction_kind = None,
            Marker::PayBill(id) => {
                s.paying_bill_ids.remove(id);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_markers_are_counted() {
        let (tx, rx) = watch::channel(StoreState::default());
        let first = InFlight::fetch(&tx);
        let second = InFlight::fetch(&tx);
        assert!(rx.borrow().loading);

        drop(first);
        assert!(rx.borrow().loading);
        drop(second);
        assert!(!rx.borrow().loading);
    }

    #[test]
    fn test_second_submission_is_rejected() {
        let (tx, rx) = watch::channel(StoreState::default());
        let guard = InFlight::create_transaction(&tx, TransactionKind::Income).unwrap();
        assert_eq!(
            rx.borrow().creating_transaction_kind,
            Some(TransactionKind::Income)
        );

        let err = InFlight::create_transaction(&tx, TransactionKind::Expense).unwrap_err();
        assert!(err.is_in_flight());

        drop(guard);
        assert_eq!(rx.borrow().creating_transaction_kind, None);
        assert!(InFlight::create_transaction(&tx, TransactionKind::Expense).is_ok());
    }

    #[test]
    fn test_bill_markers_are_per_bill() {
        let (tx, rx) = watch::channel(StoreState::default());
        let b1 = BillId::from("b1");
        let b2 = BillId::from("b2");

        let guard = InFlight::pay_bill(&tx, &b1).unwrap();
        assert!(InFlight::pay_bill(&tx, &b1).unwrap_err().is_in_flight());
        let other = InFlight::pay_bill(&tx, &b2).unwrap();
        assert_eq!(rx.borrow().paying_bill_ids.len(), 2);

        drop(guard);
        drop(other);
        assert!(rx.borrow().paying_bill_ids.is_empty());
    }

    #[test]
    fn test_marker_released_on_panic() {
        let (tx, rx) = watch::channel(StoreState::default());
        let id = BillId::from("b1");

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = InFlight::pay_bill(&tx, &id).unwrap();
            panic!("action blew up");
        }));

        assert!(result.is_err());
        assert!(!rx.borrow().is_paying(&id));
    }
}
