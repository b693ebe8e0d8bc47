use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::sync::Notify;
use tracing::{info, warn};

use crate::application::{AppError, ExpenseForm, ExpenseService};
use crate::auth::{
    AuthError, Authenticator, CancellationToken, RegistrationRequest, UserDirectory, UserProfile,
};
use crate::domain::{Category, ExpenseId, Field, Ledger, ValidationError, format_currency};

use super::{SessionCommand, SessionConfig, SessionLine, render, split_args};

/// Whether the session loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One interactive run: the signed-in user and their expenses.
pub struct Session {
    config: SessionConfig,
    authenticator: Authenticator,
    expenses: ExpenseService,
    user: Option<UserProfile>,
    /// Expense awaiting a yes/no answer
    pending_delete: Option<ExpenseId>,
    /// Signalled when the user presses Ctrl-C
    interrupt: Arc<Notify>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_ledger(config, Ledger::new())
    }

    pub fn with_ledger(config: SessionConfig, ledger: Ledger) -> Self {
        let authenticator = Authenticator::new(UserDirectory::with_demo_users(), config.auth);
        Self {
            config,
            authenticator,
            expenses: ExpenseService::new(ledger),
            user: None,
            pending_delete: None,
            interrupt: Arc::new(Notify::new()),
        }
    }

    /// Handle used to interrupt the session.
    ///
    /// A notification cancels the auth request in flight. One that arrives
    /// while nothing is waiting is kept for the next waiter.
    pub fn interrupt(&self) -> Arc<Notify> {
        Arc::clone(&self.interrupt)
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn expenses(&self) -> &ExpenseService {
        &self.expenses
    }

    /// True while a delete is waiting for confirmation.
    pub fn awaiting_confirmation(&self) -> bool {
        self.pending_delete.is_some()
    }

    /// Sign in with the configured credentials, if any.
    pub async fn start(&mut self, out: &mut impl Write) -> Result<()> {
        let credentials = self.config.email.clone().zip(self.config.password.clone());
        match credentials {
            Some((email, password)) => {
                if let Err(e) = self.login(&email, &password, out).await {
                    report(out, e)?;
                }
            }
            None => writeln!(
                out,
                "Sign in with `login <email> <password>` or create an account with `register`."
            )?,
        }
        Ok(())
    }

    /// Handle one line of input.
    ///
    /// Rejected input is reported to `out` and the session carries on; only
    /// failures to write output are returned as errors.
    pub async fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        if let Some(id) = self.pending_delete.take() {
            self.confirm_delete(id, line, out)?;
            return Ok(Flow::Continue);
        }

        let args = match split_args(line) {
            Ok(args) if args.is_empty() => return Ok(Flow::Continue),
            Ok(args) => args,
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                return Ok(Flow::Continue);
            }
        };

        let command = match SessionLine::try_parse_from(args) {
            Ok(line) => line.command,
            Err(e) => {
                write!(out, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };

        match self.dispatch(command, out).await {
            Ok(flow) => Ok(flow),
            Err(e) => {
                report(out, e)?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn dispatch(&mut self, command: SessionCommand, out: &mut impl Write) -> Result<Flow> {
        match command {
            SessionCommand::Login { email, password } => {
                self.login(&email, &password, out).await?;
            }

            SessionCommand::Register {
                name,
                email,
                password,
                confirm,
                phone,
                accept_terms,
            } => {
                let request = RegistrationRequest {
                    name,
                    email,
                    password,
                    confirm_password: confirm,
                    phone,
                    accepted_terms: accept_terms,
                };
                self.register(request, out).await?;
            }

            SessionCommand::Logout => {
                let user = self.user.take().ok_or(AppError::NotSignedIn)?;
                self.expenses.reset();
                info!(email = %user.email, "logged out");
                writeln!(out, "Signed out. Goodbye, {}", user.first_name())?;
            }

            SessionCommand::Add {
                amount,
                category,
                date,
                description,
            } => {
                self.require_user()?;
                let date = date.unwrap_or_else(|| {
                    self.expenses.ledger().today().format("%Y-%m-%d").to_string()
                });
                let record = self.expenses.record_expense(ExpenseForm {
                    date: Some(date),
                    category: Some(category),
                    amount: Some(amount),
                    description,
                })?;
                writeln!(out, "Expense added")?;
                render::expense_line(out, &record)?;
            }

            SessionCommand::List { category, format } => {
                self.require_user()?;
                let filter = category
                    .map(|c| c.parse::<Category>())
                    .transpose()
                    .map_err(|e| {
                        AppError::InvalidForm(vec![ValidationError::new(
                            Field::Category,
                            e.to_string(),
                        )])
                    })?;
                let records = self.expenses.list_expenses(filter);
                render::expenses(out, &records, format)?;
            }

            SessionCommand::Summary { format } => {
                self.require_user()?;
                render::summary(out, &self.expenses.monthly_summary(), format)?;
            }

            SessionCommand::Delete { id, yes } => {
                self.require_user()?;
                let id = self.expenses.resolve_id(&id)?;
                if yes {
                    self.delete(id, out)?;
                } else {
                    let record = self.expenses.expense(id)?;
                    writeln!(
                        out,
                        "Delete '{}' ({})? [y/N]",
                        record.description(),
                        format_currency(record.amount_cents())
                    )?;
                    self.pending_delete = Some(id);
                }
            }

            SessionCommand::Categories => render::categories(out)?,

            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn login(&mut self, email: &str, password: &str, out: &mut impl Write) -> Result<()> {
        let cancel = CancellationToken::new();
        let result = with_interrupt(
            self.authenticator.login(email, password, &cancel),
            &cancel,
            &self.interrupt,
        )
        .await;

        let profile = match result {
            Ok(profile) => profile,
            Err(AuthError::Cancelled) => {
                warn!(email, "login cancelled");
                return Err(AppError::from(AuthError::Cancelled).into());
            }
            Err(e) => return Err(AppError::from(e).into()),
        };

        // Switching accounts starts a fresh dashboard
        let switched = self
            .user
            .as_ref()
            .is_some_and(|current| !current.email.eq_ignore_ascii_case(&profile.email));
        if switched {
            self.expenses.reset();
        }
        self.user = Some(profile.clone());
        render::greeting(out, profile.first_name())?;

        if self.config.sample_data && self.expenses.ledger().is_empty() {
            self.expenses.load_sample_data()?;
        }
        Ok(())
    }

    async fn register(&mut self, request: RegistrationRequest, out: &mut impl Write) -> Result<()> {
        let cancel = CancellationToken::new();
        let profile = with_interrupt(
            self.authenticator.register(request, &cancel),
            &cancel,
            &self.interrupt,
        )
        .await
            .map_err(AppError::from)?;
        writeln!(
            out,
            "Account created for {}. You can now log in.",
            profile.email
        )?;
        Ok(())
    }

    fn require_user(&self) -> Result<&UserProfile, AppError> {
        self.user.as_ref().ok_or(AppError::NotSignedIn)
    }

    fn confirm_delete(&mut self, id: ExpenseId, answer: &str, out: &mut impl Write) -> Result<()> {
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => self.delete(id, out),
            _ => {
                writeln!(out, "Deletion cancelled")?;
                Ok(())
            }
        }
    }

    fn delete(&mut self, id: ExpenseId, out: &mut impl Write) -> Result<()> {
        if self.expenses.delete_expense(id) {
            writeln!(out, "Expense deleted")?;
        } else {
            writeln!(out, "Expense was already gone")?;
        }
        Ok(())
    }
}

/// Render domain failures for the user; anything else is a real error.
fn report(out: &mut impl Write, error: anyhow::Error) -> Result<()> {
    match error.downcast::<AppError>() {
        Ok(app_error) => render::app_error(out, &app_error),
        Err(other) => Err(other),
    }
}

/// Run an auth request, cancelling it if the session is interrupted meanwhile.
async fn with_interrupt<T>(
    request: impl Future<Output = Result<T, AuthError>>,
    cancel: &CancellationToken,
    interrupt: &Notify,
) -> Result<T, AuthError> {
    tokio::pin!(request);
    tokio::select! {
        result = &mut request => result,
        _ = interrupt.notified() => {
            cancel.cancel();
            request.await
        }
    }
}
