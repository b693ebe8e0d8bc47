use chrono::{DateTime, Utc};
use serde::Serialize;

use super::AuthError;

/// Public view of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub registered_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            registered_at: None,
        }
    }

    /// First word of the name, used to greet the user.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

struct UserAccount {
    profile: UserProfile,
    password: String,
}

/// In-memory stand-in for a user backend.
pub struct UserDirectory {
    accounts: Vec<UserAccount>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
        }
    }

    /// Directory pre-populated with the two demo accounts.
    pub fn with_demo_users() -> Self {
        let mut directory = Self::new();
        for (email, password, name) in [
            ("usuario@demo.com", "12345678", "Usuario Demo"),
            ("test@gastocontrol.com", "password123", "Usuario Test"),
        ] {
            directory.accounts.push(UserAccount {
                profile: UserProfile::new(name, email),
                password: password.to_string(),
            });
        }
        directory
    }

    /// Emails are compared case-insensitively.
    pub fn contains_email(&self, email: &str) -> bool {
        self.find(email).is_some()
    }

    pub fn authenticate(&self, email: &str, password: &str) -> Option<UserProfile> {
        self.find(email)
            .filter(|account| account.password == password)
            .map(|account| account.profile.clone())
    }

    pub fn insert(&mut self, profile: UserProfile, password: String) -> Result<(), AuthError> {
        if self.contains_email(&profile.email) {
            return Err(AuthError::EmailAlreadyRegistered(profile.email));
        }
        self.accounts.push(UserAccount { profile, password });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn find(&self, email: &str) -> Option<&UserAccount> {
        self.accounts
            .iter()
            .find(|account| account.profile.email.eq_ignore_ascii_case(email))
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::with_demo_users()
    }
}
