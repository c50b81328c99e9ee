//! Bill model
//!
//! A bill is a payable obligation. It starts `pending` and moves to `paid`
//! exactly once, at which point it records the transaction that settled it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BillId, TransactionId};
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Paid,
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Paid => write!(f, "Paid"),
        }
    }
}

/// A payable obligation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: BillId,

    pub description: String,

    pub amount: Money,

    pub due_date: NaiveDate,

    #[serde(default)]
    pub status: BillStatus,

    /// Account the settling transaction is drawn from
    pub account: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,

    /// Settling transaction; present only once paid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<TransactionId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Bill {
    pub fn is_paid(&self) -> bool {
        self.status == BillStatus::Paid
    }

    pub fn is_pending(&self) -> bool {
        self.status == BillStatus::Pending
    }

    /// Pending and past its due date
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_pending() && self.due_date < today
    }

    /// Move the bill to `paid`, recording its settling transaction
    pub fn mark_paid(
        &mut self,
        transaction_id: TransactionId,
        paid_at: DateTime<Utc>,
    ) -> Result<(), BillTransitionError> {
        if self.is_paid() {
            return Err(BillTransitionError::AlreadyPaid(self.id.clone()));
        }
        self.status = BillStatus::Paid;
        self.paid_at = Some(paid_at);
        self.transaction_id = Some(transaction_id);
        Ok(())
    }
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.due_date.format("%Y-%m-%d"),
            self.description,
            self.amount,
            self.status
        )
    }
}

/// Input for registering a new bill
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBill {
    pub id: Option<BillId>,
    pub description: String,
    pub amount: Money,
    pub due_date: Option<NaiveDate>,
    pub account: String,
    /// Defaults to `pending`
    pub status: Option<BillStatus>,
    pub notes: Option<String>,
}

impl NewBill {
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        due_date: NaiveDate,
        account: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            description: description.into(),
            amount,
            due_date: Some(due_date),
            account: account.into(),
            status: None,
            notes: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<BillId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn validate(&self) -> Result<(), BillValidationError> {
        if !self.amount.is_positive() {
            return Err(BillValidationError::NonPositiveAmount(self.amount));
        }
        if self.description.trim().is_empty() {
            return Err(BillValidationError::MissingDescription);
        }
        if self.account.trim().is_empty() {
            return Err(BillValidationError::MissingAccount);
        }
        if self.due_date.is_none() {
            return Err(BillValidationError::MissingDueDate);
        }
        if self.status == Some(BillStatus::Paid) {
            return Err(BillValidationError::CreatedPaid);
        }
        if self.id.as_ref().is_some_and(|id| id.is_blank()) {
            return Err(BillValidationError::BlankId);
        }
        Ok(())
    }

    /// Callers must run [`NewBill::validate`] first.
    pub(crate) fn into_bill(self, due_date: NaiveDate) -> Bill {
        Bill {
            id: self.id.unwrap_or_default(),
            description: self.description.trim().to_string(),
            amount: self.amount,
            due_date,
            status: self.status.unwrap_or_default(),
            account: self.account.trim().to_string(),
            paid_at: None,
            transaction_id: None,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillValidationError {
    NonPositiveAmount(Money),
    MissingDescription,
    MissingAccount,
    MissingDueDate,
    CreatedPaid,
    BlankId,
}

impl fmt::Display for BillValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Bill amount must be greater than zero (got {})", amount)
            }
            Self::MissingDescription => write!(f, "Bill description is required"),
            Self::MissingAccount => write!(f, "Bill account is required"),
            Self::MissingDueDate => write!(f, "Bill due date is required"),
            Self::CreatedPaid => write!(
                f,
                "Bills must be created pending; pay them to record the settling transaction"
            ),
            Self::BlankId => write!(f, "Bill id must not be blank"),
        }
    }
}

impl std::error::Error for BillValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillTransitionError {
    AlreadyPaid(BillId),
}

impl fmt::Display for BillTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyPaid(id) => write!(f, "Bill {} is already paid", id),
        }
    }
}

impl std::error::Error for BillTransitionError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn bill() -> Bill {
        NewBill::new("Electricity", Money::from_cents(18990), due(), "Main")
            .with_id("b1")
            .into_bill(due())
    }

    #[test]
    fn test_new_bill_defaults_to_pending() {
        let bill = bill();
        assert!(bill.is_pending());
        assert!(bill.paid_at.is_none());
        assert!(bill.transaction_id.is_none());
    }

    #[test]
    fn test_mark_paid_only_once() {
        let mut bill = bill();
        let paid_at = Utc::now();
        bill.mark_paid(TransactionId::from("t9"), paid_at).unwrap();

        assert!(bill.is_paid());
        assert_eq!(bill.paid_at, Some(paid_at));
        assert_eq!(bill.transaction_id, Some(TransactionId::from("t9")));

        let before = bill.clone();
        assert_eq!(
            bill.mark_paid(TransactionId::from("t10"), Utc::now()),
            Err(BillTransitionError::AlreadyPaid(BillId::from("b1")))
        );
        assert_eq!(bill, before);
    }

    #[test]
    fn test_overdue() {
        let bill = bill();
        assert!(bill.is_overdue(NaiveDate::from_ymd_opt(2025, 3, 11).unwrap()));
        assert!(!bill.is_overdue(due()));
    }

    #[test]
    fn test_validation() {
        let ok = NewBill::new("Rent", Money::from_cents(1), due(), "Main");
        assert!(ok.validate().is_ok());

        let mut zero = ok.clone();
        zero.amount = Money::zero();
        assert!(matches!(
            zero.validate(),
            Err(BillValidationError::NonPositiveAmount(_))
        ));

        let mut no_due = ok.clone();
        no_due.due_date = None;
        assert_eq!(no_due.validate(), Err(BillValidationError::MissingDueDate));

        let mut paid = ok;
        paid.status = Some(BillStatus::Paid);
        assert_eq!(paid.validate(), Err(BillValidationError::CreatedPaid));
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(bill()).unwrap();
        assert_eq!(value["dueDate"], "2025-03-10");
        assert_eq!(value["status"], "pending");
        assert!(value.get("transactionId").is_none());
    }
}
