use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use super::{
    AuthError, CancellationToken, CredentialField, FieldError, PasswordStrength, UserDirectory,
    UserProfile, is_long_enough, is_valid_email, is_valid_name, is_valid_phone,
};

/// Simulated network latency of the mock backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthConfig {
    pub login_delay: Duration,
    pub register_delay: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_delay: Duration::from_millis(1500),
            register_delay: Duration::from_millis(2000),
        }
    }
}

/// Data collected by the sign-up form.
#[derive(Debug, Clone, Default)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: Option<String>,
    pub accepted_terms: bool,
}

/// Mock login and registration against an in-memory directory.
pub struct Authenticator {
    directory: UserDirectory,
    config: AuthConfig,
}

impl Authenticator {
    pub fn new(directory: UserDirectory, config: AuthConfig) -> Self {
        Self { directory, config }
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    /// Check credentials after the configured login delay.
    ///
    /// Malformed input fails immediately without waiting. If `cancel` fires
    /// before the delay elapses the call resolves to [`AuthError::Cancelled`].
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        cancel: &CancellationToken,
    ) -> Result<UserProfile, AuthError> {
        let email = email.trim();
        let mut errors = Vec::new();

        if email.is_empty() {
            errors.push(FieldError::new(CredentialField::Email, "email is required"));
        } else if !is_valid_email(email) {
            errors.push(FieldError::new(CredentialField::Email, "enter a valid email"));
        }

        if password.is_empty() {
            errors.push(FieldError::new(
                CredentialField::Password,
                "password is required",
            ));
        } else if !is_long_enough(password) {
            errors.push(FieldError::new(
                CredentialField::Password,
                "password must be at least 8 characters",
            ));
        }

        if !errors.is_empty() {
            return Err(AuthError::InvalidInput(errors));
        }

        simulate_latency(self.config.login_delay, cancel).await?;

        match self.directory.authenticate(email, password) {
            Some(profile) => {
                info!(email, "login succeeded");
                Ok(profile)
            }
            None => {
                warn!(email, "login rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Create an account after the configured registration delay.
    ///
    /// All form errors are reported together. The email uniqueness check runs
    /// after the delay, against the directory as it is at that moment.
    pub async fn register(
        &mut self,
        request: RegistrationRequest,
        cancel: &CancellationToken,
    ) -> Result<UserProfile, AuthError> {
        let name = request.name.trim().to_string();
        let email = request.email.trim().to_string();
        let phone = request
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        let errors = registration_errors(&name, &email, &request, phone.as_deref());
        if !errors.is_empty() {
            return Err(AuthError::InvalidInput(errors));
        }

        simulate_latency(self.config.register_delay, cancel).await?;

        let profile = UserProfile {
            name,
            email,
            phone,
            registered_at: Some(Utc::now()),
        };
        self.directory
            .insert(profile.clone(), request.password)
            .inspect_err(|_| warn!(email = %profile.email, "registration rejected"))?;

        info!(email = %profile.email, "user registered");
        Ok(profile)
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new(UserDirectory::with_demo_users(), AuthConfig::default())
    }
}

fn registration_errors(
    name: &str,
    email: &str,
    request: &RegistrationRequest,
    phone: Option<&str>,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push(FieldError::new(CredentialField::Name, "name is required"));
    } else if !is_valid_name(name) {
        errors.push(FieldError::new(
            CredentialField::Name,
            "name may only contain letters and spaces (at least 2 characters)",
        ));
    }

    if email.is_empty() {
        errors.push(FieldError::new(CredentialField::Email, "email is required"));
    } else if !is_valid_email(email) {
        errors.push(FieldError::new(CredentialField::Email, "enter a valid email"));
    }

    if request.password.is_empty() {
        errors.push(FieldError::new(
            CredentialField::Password,
            "password is required",
        ));
    } else {
        let strength = PasswordStrength::of(&request.password);
        if !strength.is_valid() {
            errors.push(FieldError::new(
                CredentialField::Password,
                format!("password needs {}", strength.missing().join(", ")),
            ));
        }
    }

    if request.confirm_password.is_empty() {
        errors.push(FieldError::new(
            CredentialField::ConfirmPassword,
            "confirm your password",
        ));
    } else if request.password != request.confirm_password {
        errors.push(FieldError::new(
            CredentialField::ConfirmPassword,
            "passwords do not match",
        ));
    }

    if phone.is_some_and(|p| !is_valid_phone(p)) {
        errors.push(FieldError::new(
            CredentialField::Phone,
            "invalid phone format (e.g. +57 300 123 4567)",
        ));
    }

    if !request.accepted_terms {
        errors.push(FieldError::new(
            CredentialField::Terms,
            "you must accept the terms and conditions",
        ));
    }

    errors
}

async fn simulate_latency(delay: Duration, cancel: &CancellationToken) -> Result<(), AuthError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AuthError::Cancelled),
        _ = tokio::time::sleep(delay) => Ok(()),
    }
}
