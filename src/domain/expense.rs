use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use super::{Category, Cents, ExpenseId};

/// A single spending event.
/// Records are immutable once created; corrections are made by removing and re-adding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseRecord {
    id: ExpenseId,
    /// Monotonically increasing insertion number, assigned by the ledger
    sequence: u64,
    /// Day the money was spent
    date: NaiveDate,
    category: Category,
    /// Amount in cents (always positive)
    amount_cents: Cents,
    description: String,
    /// Unix timestamp of `date` at midnight UTC, used for display ordering
    sort_key: i64,
}

impl ExpenseRecord {
    /// Build a record. The ledger is responsible for validating `date` and
    /// `amount_cents` and for assigning `id` and `sequence`.
    pub(crate) fn new(
        id: ExpenseId,
        sequence: u64,
        date: NaiveDate,
        category: Category,
        amount_cents: Cents,
        description: Option<&str>,
    ) -> Self {
        let description = match description.map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => category.display_name().to_string(),
        };

        Self {
            id,
            sequence,
            date,
            category,
            amount_cents,
            description,
            sort_key: sort_key_for(date),
        }
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn amount_cents(&self) -> Cents {
        self.amount_cents
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn sort_key(&self) -> i64 {
        self.sort_key
    }
}

/// Ordering key for a date; monotonic with the date itself.
pub fn sort_key_for(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}
