use chrono::NaiveDate;

use super::{Category, Cents};

/// An expense entry before it is added to a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleExpense {
    pub date: NaiveDate,
    pub category: Category,
    pub amount_cents: Cents,
    pub description: &'static str,
}

const SAMPLE: [(u32, Category, Cents, &str); 5] = [
    (15, Category::Food, 4_500_000, "Restaurant lunch"),
    (14, Category::Transport, 1_200_000, "Public transport"),
    (13, Category::Housing, 18_000_000, "Utility bills"),
    (12, Category::Entertainment, 2_500_000, "Cinema with friends"),
    (11, Category::Health, 6_800_000, "Medicine"),
];

/// Demo dataset shown on a fresh dashboard: five expenses in October 2024
/// totalling $330.000.
pub fn sample_expenses() -> Vec<SampleExpense> {
    SAMPLE
        .iter()
        .map(|&(day, category, amount_cents, description)| SampleExpense {
            date: NaiveDate::from_ymd_opt(2024, 10, day).expect("valid sample date"),
            category,
            amount_cents,
            description,
        })
        .collect()
}
