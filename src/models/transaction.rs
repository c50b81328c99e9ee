//! Transaction model
//!
//! A transaction is a single money movement into (`income`) or out of
//! (`expense`) a ledger account. Transactions are immutable once recorded.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{BillId, TransactionId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!(
                "Unknown transaction kind '{}' (expected income or expense)",
                other
            )),
        }
    }
}

/// A recorded money movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,

    pub kind: TransactionKind,

    pub category: String,

    /// Always positive; the direction lives in `kind`
    pub amount: Money,

    pub date: NaiveDate,

    #[serde(default)]
    pub description: String,

    /// Ledger sub-account
    pub account: String,

    /// Bill settled by this transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<BillId>,

    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// True when this transaction settles a bill
    pub fn settles_bill(&self) -> bool {
        self.bill_id.is_some()
    }

    /// Amount with its direction applied (expenses negative)
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => Money::zero() - self.amount,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.kind,
            self.amount
        )
    }
}

/// Input for recording a new transaction
///
/// `date` is optional only so that a missing date is reported as a
/// validation failure rather than silently defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// Caller-chosen id; generated when absent
    pub id: Option<TransactionId>,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Money,
    pub date: Option<NaiveDate>,
    pub description: String,
    pub account: String,
}

impl NewTransaction {
    pub fn new(
        kind: TransactionKind,
        category: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        account: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            kind,
            category: category.into(),
            amount,
            date: Some(date),
            description: String::new(),
            account: account.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<TransactionId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Check the domain rules for a new transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::MissingCategory);
        }
        if self.account.trim().is_empty() {
            return Err(TransactionValidationError::MissingAccount);
        }
        if self.date.is_none() {
            return Err(TransactionValidationError::MissingDate);
        }
        if self.id.as_ref().is_some_and(|id| id.is_blank()) {
            return Err(TransactionValidationError::BlankId);
        }
        Ok(())
    }

    /// Build the stored transaction, applying defaults
    ///
    /// Callers must run [`NewTransaction::validate`] first.
    pub(crate) fn into_transaction(
        self,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Transaction {
        let category = self.category.trim().to_string();
        let description = match self.description.trim() {
            "" => category.clone(),
            text => text.to_string(),
        };

        Transaction {
            id: self.id.unwrap_or_default(),
            kind: self.kind,
            category,
            amount: self.amount,
            date,
            description,
            account: self.account.trim().to_string(),
            bill_id: None,
            created_at: now,
            updated_at: Some(now),
        }
    }
}

/// Validation errors for new transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    MissingCategory,
    MissingAccount,
    MissingDate,
    BlankId,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::MissingCategory => write!(f, "Category is required"),
            Self::MissingAccount => write!(f, "Account is required"),
            Self::MissingDate => write!(f, "Date is required"),
            Self::BlankId => write!(f, "Transaction id must not be blank"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn input(amount: i64) -> NewTransaction {
        NewTransaction::new(
            TransactionKind::Expense,
            "Groceries",
            Money::from_cents(amount),
            date(),
            "Main",
        )
    }

    #[test]
    fn test_amount_boundary() {
        assert_eq!(
            input(0).validate(),
            Err(TransactionValidationError::NonPositiveAmount(Money::zero()))
        );
        assert!(input(-5).validate().is_err());
        assert!(input(1).validate().is_ok());
    }

    #[test]
    fn test_required_fields() {
        let mut missing_category = input(100);
        missing_category.category = "   ".into();
        assert_eq!(
            missing_category.validate(),
            Err(TransactionValidationError::MissingCategory)
        );

        let mut missing_account = input(100);
        missing_account.account = String::new();
        assert_eq!(
            missing_account.validate(),
            Err(TransactionValidationError::MissingAccount)
        );

        let mut missing_date = input(100);
        missing_date.date = None;
        assert_eq!(
            missing_date.validate(),
            Err(TransactionValidationError::MissingDate)
        );
    }

    #[test]
    fn test_description_defaults_to_category() {
        let now = Utc::now();
        let txn = input(100).into_transaction(date(), now);
        assert_eq!(txn.description, "Groceries");
        assert_eq!(txn.created_at, now);
        assert!(txn.bill_id.is_none());

        let txn = input(100)
            .with_description("Weekly shop")
            .into_transaction(date(), now);
        assert_eq!(txn.description, "Weekly shop");
    }

    #[test]
    fn test_signed_amount() {
        let txn = input(2500).into_transaction(date(), Utc::now());
        assert_eq!(txn.signed_amount().cents(), -2500);
        assert!(txn.is_expense());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Income".parse::<TransactionKind>(), Ok(TransactionKind::Income));
        assert_eq!("expense".parse::<TransactionKind>(), Ok(TransactionKind::Expense));
        assert!("entrada".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_serialized_field_names() {
        let txn = input(100).into_transaction(date(), Utc::now());
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["kind"], "expense");
        assert_eq!(value["amount"], 100);
        assert_eq!(value["date"], "2025-01-15");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("billId").is_none());
    }
}
