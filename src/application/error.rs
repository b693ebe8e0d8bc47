use thiserror::Error;

use crate::auth::AuthError;
use crate::domain::{ExpenseId, ValidationError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid expense ({} field(s) rejected)", .0.len())]
    InvalidForm(Vec<ValidationError>),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),

    #[error("Expense id '{0}' matches more than one expense")]
    AmbiguousExpenseId(String),

    #[error("Sign in to manage expenses")]
    NotSignedIn,

    #[error(transparent)]
    Authentication(#[from] AuthError),
}

impl AppError {
    pub fn not_found(id: ExpenseId) -> Self {
        AppError::ExpenseNotFound(id.to_string())
    }
}
