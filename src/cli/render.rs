use std::io::Write;

use anyhow::Result;

use crate::application::AppError;
use crate::auth::AuthError;
use crate::domain::{Category, ExpenseRecord, MonthlySummary, format_currency};

use super::OutputFormat;

pub fn greeting(out: &mut impl Write, first_name: &str) -> Result<()> {
    writeln!(out, "Hello, {}", first_name)?;
    Ok(())
}

pub fn expenses(out: &mut impl Write, records: &[ExpenseRecord], format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(records)?)?;
        return Ok(());
    }

    if records.is_empty() {
        writeln!(out, "No expenses recorded")?;
        writeln!(out, "Add your first expense with `add <amount> --category <key>`")?;
        return Ok(());
    }

    for record in records {
        expense_line(out, record)?;
    }
    Ok(())
}

pub fn expense_line(out: &mut impl Write, record: &ExpenseRecord) -> Result<()> {
    let id = record.id().to_string();
    writeln!(
        out,
        "{} {}  {:<24} {:>14}  {}",
        record.category().icon(),
        record.date().format("%B %-d, %Y"),
        record.description(),
        format_currency(record.amount_cents()),
        &id[..8],
    )?;
    Ok(())
}

pub fn summary(out: &mut impl Write, summary: &MonthlySummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(summary)?)?;
        }
        OutputFormat::Table => {
            writeln!(out, "Spent this month: {}", format_currency(summary.total))?;
            writeln!(out, "Expenses:         {}", summary.count)?;
            writeln!(out, "Daily average:    {}", format_currency(summary.daily_average))?;
        }
    }
    Ok(())
}

pub fn categories(out: &mut impl Write) -> Result<()> {
    for category in Category::ALL {
        writeln!(
            out,
            "{} {:<14} {}",
            category.icon(),
            category.as_str(),
            category.display_name()
        )?;
    }
    Ok(())
}

/// Print an error the way a form shows it: one line per rejected field.
pub fn app_error(out: &mut impl Write, error: &AppError) -> Result<()> {
    match error {
        AppError::InvalidForm(errors) => {
            writeln!(out, "Could not save the expense:")?;
            for e in errors {
                writeln!(out, "  {}", e)?;
            }
        }
        AppError::Authentication(e) => auth_error(out, e)?,
        other => writeln!(out, "Error: {}", other)?,
    }
    Ok(())
}

pub fn auth_error(out: &mut impl Write, error: &AuthError) -> Result<()> {
    match error {
        AuthError::InvalidInput(errors) => {
            writeln!(out, "Please fix the following:")?;
            for e in errors {
                writeln!(out, "  {}", e)?;
            }
        }
        other => writeln!(out, "Error: {}", other)?,
    }
    Ok(())
}
