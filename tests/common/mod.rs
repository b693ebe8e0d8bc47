// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::time::Duration;

use chrono::NaiveDate;
use expense_tracker::auth::AuthConfig;
use expense_tracker::cli::SessionConfig;
use expense_tracker::domain::{FixedClock, Ledger, SequentialIds};

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Empty ledger whose "today" is the given date, with deterministic ids
pub fn ledger_on(today: &str) -> Ledger {
    Ledger::with_sources(FixedClock::on(parse_date(today)), SequentialIds::new())
}

/// Ledger holding the five October 2024 demo expenses, as seen on 2024-10-31
pub fn sample_ledger() -> Ledger {
    let mut ledger = ledger_on("2024-10-31");
    ledger.load_sample_data().unwrap();
    ledger
}

/// Auth latencies used by the tests (time is paused, so these cost nothing)
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        login_delay: Duration::from_millis(1500),
        register_delay: Duration::from_millis(2000),
    }
}

pub fn session_config() -> SessionConfig {
    SessionConfig {
        auth: test_auth_config(),
        ..SessionConfig::default()
    }
}
