use super::validation::{Field, NewPaymentRequest, ValidationErrors};
use crate::error::PaymentError;
use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a payment request. Assigned by the store, starting at 1.
pub type RequestId = u32;

/// A strictly positive monetary amount.
///
/// Wraps `rust_decimal::Decimal` so a non-positive value can never reach a
/// stored record, including records deserialized from a persistent store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::InvalidInput(ValidationErrors::single(
                Field::Amount,
                format!("amount must be greater than 0, got {value}"),
            )))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The amount without trailing fractional zeros (`100.50` becomes `100.5`).
    pub fn normalized(&self) -> Decimal {
        self.0.normalize()
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => f.write_str("pending"),
            PaymentStatus::Paid => f.write_str("paid"),
        }
    }
}

/// Status as shown to a user at a given instant. `Overdue` is never stored.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    Pending,
    Overdue,
    Paid,
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayStatus::Pending => f.write_str("pending"),
            DisplayStatus::Overdue => f.write_str("overdue"),
            DisplayStatus::Paid => f.write_str("paid"),
        }
    }
}

/// A loan-payment request owed by one customer.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentRequest {
    pub id: RequestId,
    /// Customer name, stored trimmed.
    pub name: String,
    pub amount: Amount,
    pub status: PaymentStatus,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl PaymentRequest {
    /// Builds a freshly created, pending record from a validated draft.
    pub fn new(id: RequestId, draft: NewPaymentRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            amount: draft.amount,
            status: PaymentStatus::Pending,
            due_date: draft.due_date,
            created_at,
        }
    }

    /// Moves the request to `Paid`.
    ///
    /// Returns `true` when the status actually changed; marking an already
    /// paid request is a no-op.
    pub fn mark_paid(&mut self) -> bool {
        let changed = self.status == PaymentStatus::Pending;
        self.status = PaymentStatus::Paid;
        changed
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == PaymentStatus::Pending && self.due_date < now
    }

    pub fn display_status(&self, now: DateTime<Utc>) -> DisplayStatus {
        match self.status {
            PaymentStatus::Paid => DisplayStatus::Paid,
            PaymentStatus::Pending if self.due_date < now => DisplayStatus::Overdue,
            PaymentStatus::Pending => DisplayStatus::Pending,
        }
    }

    /// Time left before the request becomes overdue, `None` once paid or overdue.
    pub fn time_remaining(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        match self.display_status(now) {
            DisplayStatus::Pending => Some(self.due_date - now),
            DisplayStatus::Overdue | DisplayStatus::Paid => None,
        }
    }

    /// Text encoded into the scannable payment code: `PAY:<id>:<amount>:<name>`.
    pub fn payment_code(&self) -> String {
        format!("PAY:{}:{}:{}", self.id, self.amount, self.name)
    }
}
