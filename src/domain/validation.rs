use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

use super::{Cents, MAX_AMOUNT_CENTS};

pub const DATE_IN_FUTURE: &str = "date cannot be in the future";
pub const AMOUNT_OUT_OF_RANGE: &str = "amount must be between 1 and 99.999.999";

/// True if `date` is not later than the calendar day of `now`.
pub fn is_date_acceptable(date: NaiveDate, now: DateTime<Utc>) -> bool {
    date <= now.date_naive()
}

/// True if `0 < amount <= 99.999.999` (in cents).
pub fn is_amount_acceptable(amount_cents: Cents) -> bool {
    amount_cents > 0 && amount_cents <= MAX_AMOUNT_CENTS
}

/// Input field an expense validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Date,
    Category,
    Amount,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::Category => "category",
            Field::Amount => "amount",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: Field,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

pub fn check_date(date: NaiveDate, now: DateTime<Utc>) -> Result<(), ValidationError> {
    if is_date_acceptable(date, now) {
        Ok(())
    } else {
        Err(ValidationError::new(Field::Date, DATE_IN_FUTURE))
    }
}

pub fn check_amount(amount_cents: Cents) -> Result<(), ValidationError> {
    if is_amount_acceptable(amount_cents) {
        Ok(())
    } else {
        Err(ValidationError::new(Field::Amount, AMOUNT_OUT_OF_RANGE))
    }
}
