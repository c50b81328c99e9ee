//! Bill payment workflow
//!
//! Pays a bill through the state container: claims the bill's in-flight
//! marker, skips the backend when the local copy is already paid, and
//! reconciles the paid bill and its settling transaction afterwards.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::ledger::BillPayment;
use crate::error::LedgerResult;
use crate::models::BillId;
use crate::state::LedgerState;

pub struct BillPaymentWorkflow<'a> {
    state: &'a LedgerState,
}

impl<'a> BillPaymentWorkflow<'a> {
    pub fn new(state: &'a LedgerState) -> Self {
        Self { state }
    }

    /// Pay bill `id`, optionally backdating the payment
    ///
    /// Fails with `InFlight` while another payment of the same bill is
    /// outstanding. Repeated calls never duplicate the settling
    /// transaction.
    pub async fn pay(
        &self,
        id: &BillId,
        paid_at: Option<DateTime<Utc>>,
    ) -> LedgerResult<BillPayment> {
        let _paying = self.state.begin_bill_payment(id)?;

        if let Some(bill) = self.state.local_bill(id).filter(|b| b.is_paid()) {
            debug!(bill_id = %id, "bill already paid locally");
            return Ok(BillPayment {
                bill,
                transaction: None,
            });
        }

        let result = self.state.service().mark_bill_paid(id, paid_at).await;
        self.state.settle_payment(result)
    }
}
