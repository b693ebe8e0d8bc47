mod command;
pub mod render;
mod session;

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{debug, warn};

use crate::auth::AuthConfig;

pub use command::*;
pub use session::*;

/// Expense Tracker - record expenses and watch this month's spending
#[derive(Parser, Debug)]
#[command(name = "expense-tracker")]
#[command(about = "Track personal expenses and see monthly spending at a glance")]
#[command(version)]
pub struct Cli {
    /// Log filter (e.g. "warn", "expense_tracker=debug"); RUST_LOG takes precedence
    #[arg(long, env = "EXPENSE_TRACKER_LOG", default_value = "warn")]
    pub log_level: String,

    /// Simulated latency of the login request, in milliseconds
    #[arg(long, env = "EXPENSE_TRACKER_LOGIN_DELAY_MS", default_value_t = 1500)]
    pub login_delay_ms: u64,

    /// Simulated latency of the registration request, in milliseconds
    #[arg(long, env = "EXPENSE_TRACKER_REGISTER_DELAY_MS", default_value_t = 2000)]
    pub register_delay_ms: u64,

    /// Start the dashboard with the demo expenses
    #[arg(long)]
    pub sample_data: bool,

    /// Sign in at start-up with this email
    #[arg(long, env = "EXPENSE_TRACKER_EMAIL", requires = "password")]
    pub email: Option<String>,

    /// Password for --email
    #[arg(long, env = "EXPENSE_TRACKER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Settings for one interactive session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub auth: AuthConfig,
    pub sample_data: bool,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Cli {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            auth: AuthConfig {
                login_delay: Duration::from_millis(self.login_delay_ms),
                register_delay: Duration::from_millis(self.register_delay_ms),
            },
            sample_data: self.sample_data,
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    /// Run an interactive session on stdin/stdout until `quit`, end of input
    /// or Ctrl-C at the prompt.
    ///
    /// Ctrl-C while a login or registration is pending cancels that request
    /// and returns to the prompt.
    pub async fn run(self) -> Result<()> {
        let mut session = Session::new(self.session_config());
        let mut out = std::io::stdout();

        let interrupt = session.interrupt();
        let listener = tokio::spawn({
            let interrupt = interrupt.clone();
            async move {
                loop {
                    if let Err(e) = signal::ctrl_c().await {
                        warn!(error = %e, "cannot listen for Ctrl-C");
                        break;
                    }
                    interrupt.notify_one();
                }
            }
        });

        session.start(&mut out).await?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let prompt = if session.awaiting_confirmation() { "? " } else { "> " };
            write!(out, "{}", prompt)?;
            out.flush().context("Failed to flush stdout")?;

            let next = tokio::select! {
                line = lines.next_line() => line.context("Failed to read input")?,
                _ = interrupt.notified() => {
                    debug!("interrupted at the prompt");
                    writeln!(out)?;
                    break;
                }
            };
            let Some(line) = next else {
                debug!("end of input");
                writeln!(out)?;
                break;
            };

            if session.handle_line(&line, &mut out).await? == Flow::Quit {
                break;
            }
        }

        listener.abort();
        Ok(())
    }
}
