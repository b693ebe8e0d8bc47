mod common;

use anyhow::Result;
use common::{ledger_on, sample_ledger};
use expense_tracker::application::{AppError, ExpenseForm, ExpenseService};
use expense_tracker::domain::{AMOUNT_OUT_OF_RANGE, Category, DATE_IN_FUTURE, Field};

fn form(date: &str, category: &str, amount: &str, description: &str) -> ExpenseForm {
    let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
    ExpenseForm {
        date: opt(date),
        category: opt(category),
        amount: opt(amount),
        description: opt(description),
    }
}

fn field_errors(err: AppError) -> Vec<(Field, String)> {
    match err {
        AppError::InvalidForm(errors) => errors.into_iter().map(|e| (e.field, e.reason)).collect(),
        other => panic!("expected InvalidForm, got {:?}", other),
    }
}

#[test]
fn test_record_expense_from_form() -> Result<()> {
    let mut service = ExpenseService::new(ledger_on("2024-10-31"));

    let record = service.record_expense(form("2024-10-20", "Transport", "12000.50", ""))?;

    assert_eq!(record.category(), Category::Transport);
    assert_eq!(record.amount_cents(), 1_200_050);
    assert_eq!(record.description(), "Transport");
    assert_eq!(service.list_expenses(None).len(), 1);
    Ok(())
}

#[test]
fn test_empty_form_reports_every_missing_field() {
    let mut service = ExpenseService::new(ledger_on("2024-10-31"));

    let errors = field_errors(service.record_expense(ExpenseForm::default()).unwrap_err());

    assert_eq!(
        errors,
        vec![
            (Field::Date, "date is required".to_string()),
            (Field::Category, "select a category".to_string()),
            (Field::Amount, "amount is required".to_string()),
        ]
    );
    assert!(service.ledger().is_empty());
}

#[test]
fn test_invalid_values_are_reported_together() {
    let mut service = ExpenseService::new(ledger_on("2024-10-15"));

    let errors = field_errors(
        service
            .record_expense(form("2024-10-16", "groceries", "0", "Lunch"))
            .unwrap_err(),
    );

    assert_eq!(
        errors,
        vec![
            (Field::Date, DATE_IN_FUTURE.to_string()),
            (Field::Category, "unknown category 'groceries'".to_string()),
            (Field::Amount, AMOUNT_OUT_OF_RANGE.to_string()),
        ]
    );
    assert!(service.ledger().is_empty());
}

#[test]
fn test_unparseable_values() {
    let mut service = ExpenseService::new(ledger_on("2024-10-31"));

    let errors = field_errors(
        service
            .record_expense(form("15/10/2024", "food", "lots", ""))
            .unwrap_err(),
    );

    assert_eq!(
        errors,
        vec![
            (Field::Date, "date must look like YYYY-MM-DD".to_string()),
            (Field::Amount, "amount must be a number".to_string()),
        ]
    );
}

#[test]
fn test_amount_above_bound_is_rejected() {
    let mut service = ExpenseService::new(ledger_on("2024-10-31"));

    for amount in ["100000000", "99999999.01", "123456789012345678901"] {
        let errors = field_errors(
            service
                .record_expense(form("2024-10-01", "food", amount, ""))
                .unwrap_err(),
        );
        assert_eq!(errors, vec![(Field::Amount, AMOUNT_OUT_OF_RANGE.to_string())]);
    }

    assert!(
        service
            .record_expense(form("2024-10-01", "food", "99999999", ""))
            .is_ok()
    );
}

#[test]
fn test_delete_and_lookup() -> Result<()> {
    let mut service = ExpenseService::new(sample_ledger());
    let id = service.list_expenses(Some(Category::Health))[0].id();

    assert_eq!(service.expense(id)?.description(), "Medicine");
    assert!(service.delete_expense(id));
    assert!(!service.delete_expense(id));
    assert!(matches!(service.expense(id), Err(AppError::ExpenseNotFound(_))));
    Ok(())
}

#[test]
fn test_resolve_id_by_prefix() -> Result<()> {
    let service = ExpenseService::new(sample_ledger());

    // Sequential ids share a long common prefix
    let full = "00000000-0000-0000-0000-000000000003";
    assert_eq!(service.resolve_id(full)?.to_string(), full);
    assert!(matches!(
        service.resolve_id("00000000"),
        Err(AppError::AmbiguousExpenseId(_))
    ));
    assert!(matches!(
        service.resolve_id("ffff"),
        Err(AppError::ExpenseNotFound(_))
    ));
    assert!(matches!(
        service.resolve_id(""),
        Err(AppError::ExpenseNotFound(_))
    ));
    Ok(())
}

#[test]
fn test_monthly_summary_uses_ledger_today() {
    let service = ExpenseService::new(sample_ledger());
    let summary = service.monthly_summary();

    assert_eq!(summary.total, 33_000_000);
    assert_eq!(summary.count, 5);
    assert_eq!(summary.daily_average, 1_064_516);
}

#[test]
fn test_reset_discards_expenses() {
    let mut service = ExpenseService::new(sample_ledger());
    service.reset();
    assert!(service.list_expenses(None).is_empty());
    assert_eq!(service.monthly_summary().count, 0);
}
