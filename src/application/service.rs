use chrono::NaiveDate;
use tracing::warn;

use crate::domain::{
    AMOUNT_OUT_OF_RANGE, Category, DATE_IN_FUTURE, ExpenseId, ExpenseRecord, Field, Ledger,
    MonthlySummary, ParseCentsError, ValidationError, is_amount_acceptable, is_date_acceptable,
    parse_cents,
};

use super::AppError;

/// Raw input of the expense form, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct ExpenseForm {
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// Category key, e.g. "food"
    pub category: Option<String>,
    /// Decimal amount, e.g. "45000" or "12.50"
    pub amount: Option<String>,
    pub description: Option<String>,
}

/// Application service providing the operations a front end needs.
/// This is the primary interface for any client (CLI, TUI, etc.).
pub struct ExpenseService {
    ledger: Ledger,
}

impl ExpenseService {
    pub fn new(ledger: Ledger) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Validate a submitted form and record the expense.
    ///
    /// Every field is checked before anything is rejected, so the caller can
    /// show all problems at once.
    pub fn record_expense(&mut self, form: ExpenseForm) -> Result<ExpenseRecord, AppError> {
        let mut errors = Vec::new();
        let now = self.ledger.now();

        let date = match non_blank(&form.date) {
            None => reject(&mut errors, Field::Date, "date is required"),
            Some(text) => match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                Ok(date) if is_date_acceptable(date, now) => Some(date),
                Ok(_) => reject(&mut errors, Field::Date, DATE_IN_FUTURE),
                Err(_) => reject(&mut errors, Field::Date, "date must look like YYYY-MM-DD"),
            },
        };

        let category = match non_blank(&form.category) {
            None => reject(&mut errors, Field::Category, "select a category"),
            Some(text) => match text.parse::<Category>() {
                Ok(category) => Some(category),
                Err(e) => reject(&mut errors, Field::Category, e.to_string()),
            },
        };

        let amount = match non_blank(&form.amount) {
            None => reject(&mut errors, Field::Amount, "amount is required"),
            Some(text) => match parse_cents(text) {
                Ok(cents) if is_amount_acceptable(cents) => Some(cents),
                Ok(_) | Err(ParseCentsError::OutOfRange) => {
                    reject(&mut errors, Field::Amount, AMOUNT_OUT_OF_RANGE)
                }
                Err(ParseCentsError::InvalidFormat) => {
                    reject(&mut errors, Field::Amount, "amount must be a number")
                }
            },
        };

        match (date, category, amount) {
            (Some(date), Some(category), Some(amount)) if errors.is_empty() => Ok(self
                .ledger
                .add(date, category, amount, form.description.as_deref())?),
            _ => {
                warn!(rejected = errors.len(), "expense form rejected");
                Err(AppError::InvalidForm(errors))
            }
        }
    }

    /// Get a single expense.
    pub fn expense(&self, id: ExpenseId) -> Result<ExpenseRecord, AppError> {
        self.ledger
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found(id))
    }

    /// Resolve a full id or a unique prefix of one, as shown in listings.
    pub fn resolve_id(&self, text: &str) -> Result<ExpenseId, AppError> {
        let text = text.trim().to_lowercase();
        let matches: Vec<ExpenseId> = self
            .ledger
            .list(None)
            .iter()
            .map(|r| r.id())
            .filter(|id| !text.is_empty() && id.to_string().starts_with(&text))
            .collect();

        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(AppError::ExpenseNotFound(text)),
            _ => Err(AppError::AmbiguousExpenseId(text)),
        }
    }

    /// Delete an expense. Returns false if it did not exist.
    pub fn delete_expense(&mut self, id: ExpenseId) -> bool {
        self.ledger.remove(id)
    }

    /// List expenses, most recent first, optionally for one category.
    pub fn list_expenses(&self, category: Option<Category>) -> Vec<ExpenseRecord> {
        self.ledger.list(category)
    }

    /// Statistics for the current calendar month.
    pub fn monthly_summary(&self) -> MonthlySummary {
        self.ledger.summary(self.ledger.today())
    }

    pub fn load_sample_data(&mut self) -> Result<Vec<ExpenseRecord>, AppError> {
        Ok(self.ledger.load_sample_data()?)
    }

    /// Forget every expense, as when the session ends.
    pub fn reset(&mut self) {
        self.ledger.clear();
    }
}

impl Default for ExpenseService {
    fn default() -> Self {
        Self::new(Ledger::new())
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn reject<T>(errors: &mut Vec<ValidationError>, field: Field, reason: impl Into<String>) -> Option<T> {
    errors.push(ValidationError::new(field, reason));
    None
}
