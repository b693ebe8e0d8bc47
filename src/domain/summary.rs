use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::{Cents, ExpenseRecord};

/// Spending statistics for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MonthlySummary {
    pub total: Cents,
    pub count: usize,
    /// `total` spread over the days elapsed so far in the reference month
    pub daily_average: Cents,
}

/// Summarize the records falling in the month and year of `reference`.
///
/// The daily average divides by `reference`'s day of month, not by the
/// number of days that have expenses.
pub fn summarize(records: &[ExpenseRecord], reference: NaiveDate) -> MonthlySummary {
    let (total, count) = records
        .iter()
        .filter(|r| same_month(r.date(), reference))
        .fold((0 as Cents, 0usize), |(total, count), r| {
            (total + r.amount_cents(), count + 1)
        });

    let daily_average = if count > 0 {
        total / Cents::from(reference.day())
    } else {
        0
    };

    MonthlySummary {
        total,
        count,
        daily_average,
    }
}

fn same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}
