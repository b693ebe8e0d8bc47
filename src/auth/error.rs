use thiserror::Error;

/// Form field a credential check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialField {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Phone,
    Terms,
}

impl CredentialField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialField::Name => "name",
            CredentialField::Email => "email",
            CredentialField::Password => "password",
            CredentialField::ConfirmPassword => "confirm password",
            CredentialField::Phone => "phone",
            CredentialField::Terms => "terms",
        }
    }
}

impl std::fmt::Display for CredentialField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct FieldError {
    pub field: CredentialField,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: CredentialField, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered: {0}")]
    EmailAlreadyRegistered(String),

    #[error("Invalid input ({} field(s) rejected)", .0.len())]
    InvalidInput(Vec<FieldError>),

    #[error("Request cancelled before it completed")]
    Cancelled,
}
