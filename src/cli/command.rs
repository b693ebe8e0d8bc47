use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;

/// One line typed at the session prompt.
#[derive(Parser, Debug)]
#[command(name = "expense-tracker", no_binary_name = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    /// Sign in with email and password
    Login {
        email: String,
        password: String,
    },

    /// Create a new account
    Register {
        /// Full name
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// Password confirmation
        #[arg(long)]
        confirm: String,

        /// Phone number (optional)
        #[arg(long)]
        phone: Option<String>,

        /// Accept the terms and conditions
        #[arg(long)]
        accept_terms: bool,
    },

    /// Sign out and discard this session's expenses
    Logout,

    /// Record an expense
    Add {
        /// Amount (e.g., "45000" or "12.50")
        amount: String,

        /// Category key (see `categories`)
        #[arg(short, long)]
        category: String,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Description (defaults to the category name)
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List expenses, most recent first
    List {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show this month's total, count and daily average
    Summary {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Delete an expense by id (a unique prefix is enough)
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List the available categories
    Categories,

    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    #[error("unterminated quote in input")]
    UnterminatedQuote,
}

/// Split a line into arguments. Single or double quotes group words;
/// a backslash escapes the next character.
pub fn split_args(line: &str) -> Result<Vec<String>, SplitError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (_, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_arg = true;
            }
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(ch);
                in_arg = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_arg = true;
            }
        }
    }

    if quote.is_some() {
        return Err(SplitError::UnterminatedQuote);
    }
    if in_arg {
        args.push(current);
    }
    Ok(args)
}
