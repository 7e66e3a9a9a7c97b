//! Creation-time rules for payment requests.
//!
//! Every function here is pure: the current instant is always a parameter, so
//! the due-window boundaries can be tested without a real clock.

use super::payment_request::Amount;
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of the due window in hours. A due date must fall in `(now, now + 24h]`.
pub const DUE_WINDOW_HOURS: i64 = 24;

/// Naive layouts accepted besides RFC 3339, as produced by `datetime-local` inputs.
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

pub fn due_window() -> TimeDelta {
    TimeDelta::hours(DUE_WINDOW_HOURS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Amount,
    DueDate,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => f.write_str("name"),
            Field::Amount => f.write_str("amount"),
            Field::DueDate => f.write_str("due_date"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// All rule violations found in one candidate, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: Field, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The violation reported for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

/// Raw, unvalidated input for a new payment request.
///
/// Fields are kept as text so that unparsable values are reported as
/// validation errors rather than decode failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub due_date: String,
}

impl CandidateRequest {
    pub fn new(
        name: impl Into<String>,
        amount: impl Into<String>,
        due_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            due_date: due_date.into(),
        }
    }

    /// Builds a candidate from already-typed values.
    pub fn from_parts(name: impl Into<String>, amount: Decimal, due_date: DateTime<Utc>) -> Self {
        Self::new(name, amount.to_string(), due_date.to_rfc3339())
    }
}

/// A candidate that passed every rule, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPaymentRequest {
    pub name: String,
    pub amount: Amount,
    pub due_date: DateTime<Utc>,
}

/// Checks every field of `candidate` against the creation rules at `now`.
///
/// Fields are checked independently; the error lists every violation.
pub fn validate(
    candidate: &CandidateRequest,
    now: DateTime<Utc>,
) -> Result<NewPaymentRequest, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = candidate.name.trim();
    if name.is_empty() {
        errors.push(Field::Name, "customer name must not be empty");
    }

    let amount = parse_amount(&candidate.amount)
        .map_err(|message| errors.push(Field::Amount, message))
        .ok();

    let due_date = parse_due_date(&candidate.due_date)
        .and_then(|due| check_due_window(due, now))
        .map_err(|message| errors.push(Field::DueDate, message))
        .ok();

    match (amount, due_date) {
        (Some(amount), Some(due_date)) if errors.is_empty() => Ok(NewPaymentRequest {
            name: name.to_string(),
            amount,
            due_date,
        }),
        _ => Err(errors),
    }
}

pub fn parse_amount(raw: &str) -> Result<Amount, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("amount is required".to_string());
    }
    let value = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| format!("amount must be a number, got {raw:?}"))?;
    Amount::new(value).map_err(|_| "amount must be greater than 0".to_string())
}

/// Parses an RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM[:SS[.fff]]` value
/// taken as UTC.
pub fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("due date is required".to_string());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("due date must be a timestamp, got {raw:?}"))
}

/// Enforces `now < due <= now + 24h`.
pub fn check_due_window(due: DateTime<Utc>, now: DateTime<Utc>) -> Result<DateTime<Utc>, String> {
    if due <= now {
        return Err("due date must be in the future".to_string());
    }
    if due > now + due_window() {
        return Err(format!(
            "due date must be within {DUE_WINDOW_HOURS} hours from now"
        ));
    }
    Ok(due)
}
