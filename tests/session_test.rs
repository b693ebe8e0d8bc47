mod common;

use std::time::Duration;

use anyhow::Result;
use common::{ledger_on, session_config};
use expense_tracker::cli::{Flow, Session, SessionConfig};
use tokio::time::Instant;

/// Feed lines to a session and collect everything it printed.
async fn run_lines(session: &mut Session, lines: &[&str]) -> Result<String> {
    let mut out = Vec::new();
    for line in lines {
        session.handle_line(line, &mut out).await?;
    }
    Ok(String::from_utf8(out)?)
}

fn new_session() -> Session {
    Session::with_ledger(session_config(), ledger_on("2024-10-31"))
}

#[tokio::test(start_paused = true)]
async fn test_dashboard_requires_login() -> Result<()> {
    let mut session = new_session();

    let output = run_lines(&mut session, &["list", "add 100 -c food", "summary"]).await?;

    assert_eq!(output.matches("Sign in to manage expenses").count(), 3);
    assert!(session.expenses().ledger().is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_login_add_list_summary() -> Result<()> {
    let mut session = new_session();

    let output = run_lines(
        &mut session,
        &[
            "login usuario@demo.com 12345678",
            r#"add 45000 --category food --date 2024-10-15 -d "Restaurant lunch""#,
            "add 12000 -c transport --date 2024-10-14",
            "list",
            "summary",
        ],
    )
    .await?;

    assert!(output.contains("Hello, Usuario"));
    assert_eq!(output.matches("Expense added").count(), 2);
    assert!(output.contains("Restaurant lunch"));
    assert!(output.contains("Transport"));
    assert!(output.contains("Spent this month: $57.000"));
    assert!(output.contains("Expenses:         2"));
    assert_eq!(session.user().map(|u| u.email.as_str()), Some("usuario@demo.com"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_add_defaults_to_today() -> Result<()> {
    let mut session = new_session();

    run_lines(
        &mut session,
        &["login usuario@demo.com 12345678", "add 100 -c other"],
    )
    .await?;

    let records = session.expenses().list_expenses(None);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].date().to_string(), "2024-10-31");
    assert_eq!(records[0].description(), "Other");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_rejected_expense_shows_field_errors() -> Result<()> {
    let mut session = new_session();

    let output = run_lines(
        &mut session,
        &[
            "login usuario@demo.com 12345678",
            "add 0 -c food --date 2030-01-01",
        ],
    )
    .await?;

    assert!(output.contains("Could not save the expense:"));
    assert!(output.contains("date: date cannot be in the future"));
    assert!(output.contains("amount: amount must be between 1 and 99.999.999"));
    assert!(session.expenses().ledger().is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_wrong_credentials_keep_user_signed_out() -> Result<()> {
    let mut session = new_session();

    let output = run_lines(&mut session, &["login usuario@demo.com wrongpassword"]).await?;

    assert!(output.contains("Invalid credentials"));
    assert!(session.user().is_none());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_delete_with_confirmation() -> Result<()> {
    let mut session = new_session();
    run_lines(
        &mut session,
        &[
            "login usuario@demo.com 12345678",
            "add 100 -c food --date 2024-10-01",
        ],
    )
    .await?;
    let id = session.expenses().list_expenses(None)[0].id().to_string();

    let output = run_lines(&mut session, &[format!("delete {}", id).as_str()]).await?;
    assert!(output.contains("Delete 'Food' ($100)? [y/N]"));
    assert!(session.awaiting_confirmation());

    let output = run_lines(&mut session, &["n"]).await?;
    assert!(output.contains("Deletion cancelled"));
    assert_eq!(session.expenses().ledger().len(), 1);

    run_lines(&mut session, &[format!("delete {}", &id[..8]).as_str(), "yes"]).await?;
    assert!(session.expenses().ledger().is_empty());
    assert!(!session.awaiting_confirmation());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_delete_with_yes_flag() -> Result<()> {
    let mut session = new_session();
    run_lines(
        &mut session,
        &[
            "login usuario@demo.com 12345678",
            "add 100 -c food --date 2024-10-01",
        ],
    )
    .await?;
    let id = session.expenses().list_expenses(None)[0].id().to_string();

    let output = run_lines(&mut session, &[format!("delete --yes {}", id).as_str()]).await?;

    assert!(output.contains("Expense deleted"));
    assert!(session.expenses().ledger().is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_filter_with_no_matches_shows_placeholder() -> Result<()> {
    let mut session = new_session();

    let output = run_lines(
        &mut session,
        &[
            "login usuario@demo.com 12345678",
            "add 100 -c food --date 2024-10-01",
            "list --category clothing",
            "list --category shoes",
        ],
    )
    .await?;

    assert!(output.contains("No expenses recorded"));
    assert!(output.contains("unknown category 'shoes'"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_logout_discards_expenses() -> Result<()> {
    let mut session = new_session();

    let output = run_lines(
        &mut session,
        &[
            "login usuario@demo.com 12345678",
            "add 100 -c food --date 2024-10-01",
            "logout",
        ],
    )
    .await?;

    assert!(output.contains("Signed out. Goodbye, Usuario"));
    assert!(session.user().is_none());
    assert!(session.expenses().ledger().is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_register_then_login() -> Result<()> {
    let mut session = new_session();

    let output = run_lines(
        &mut session,
        &[
            r#"register --name "Ana Gómez" --email ana@example.com --password Secret123 --confirm Secret123 --accept-terms"#,
            "login ana@example.com Secret123",
        ],
    )
    .await?;

    assert!(output.contains("Account created for ana@example.com"));
    assert!(output.contains("Hello, Ana"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_register_form_errors() -> Result<()> {
    let mut session = new_session();

    let output = run_lines(
        &mut session,
        &["register --name Ana --email ana@example.com --password weak --confirm weak"],
    )
    .await?;

    assert!(output.contains("Please fix the following:"));
    assert!(output.contains("password: password needs"));
    assert!(output.contains("terms: you must accept the terms and conditions"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_start_with_configured_credentials_and_sample_data() -> Result<()> {
    let config = SessionConfig {
        sample_data: true,
        email: Some("test@gastocontrol.com".into()),
        password: Some("password123".into()),
        ..session_config()
    };
    let mut session = Session::with_ledger(config, ledger_on("2024-10-31"));
    let mut out = Vec::new();

    session.start(&mut out).await?;
    let output = String::from_utf8(out)? + &run_lines(&mut session, &["summary"]).await?;

    assert!(output.contains("Hello, Usuario"));
    assert!(output.contains("Spent this month: $330.000"));
    assert!(output.contains("Expenses:         5"));
    assert!(output.contains("Daily average:    $10.645"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_unknown_command_and_bad_quotes_do_not_end_session() -> Result<()> {
    let mut session = new_session();
    let mut out = Vec::new();

    assert_eq!(session.handle_line("frobnicate", &mut out).await?, Flow::Continue);
    assert_eq!(session.handle_line(r#"add "oops"#, &mut out).await?, Flow::Continue);
    assert_eq!(session.handle_line("", &mut out).await?, Flow::Continue);
    assert_eq!(session.handle_line("quit", &mut out).await?, Flow::Quit);

    let output = String::from_utf8(out)?;
    assert!(output.contains("unterminated quote"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_interrupt_cancels_pending_login() -> Result<()> {
    let mut session = new_session();
    let interrupt = session.interrupt();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        interrupt.notify_one();
    });

    let started = Instant::now();
    let output = run_lines(&mut session, &["login usuario@demo.com 12345678"]).await?;

    assert!(output.contains("Error: Request cancelled before it completed"));
    assert!(started.elapsed() < Duration::from_millis(1500));
    assert!(session.user().is_none());

    // The session is still usable afterwards
    let output = run_lines(&mut session, &["login usuario@demo.com 12345678"]).await?;
    assert!(output.contains("Hello, Usuario"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_interrupt_before_register_adds_nobody() -> Result<()> {
    let mut session = new_session();
    session.interrupt().notify_one();

    let output = run_lines(
        &mut session,
        &[
            r#"register --name "Ana Gómez" --email ana@example.com --password Secret123 --confirm Secret123 --accept-terms"#,
            "login ana@example.com Secret123",
        ],
    )
    .await?;

    assert!(output.contains("Error: Request cancelled before it completed"));
    assert!(output.contains("Invalid credentials"));
    assert!(session.user().is_none());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_same_user_login_keeps_expenses() -> Result<()> {
    let mut session = new_session();

    run_lines(
        &mut session,
        &[
            "login usuario@demo.com 12345678",
            "add 100 -c food --date 2024-10-01",
            "login USUARIO@demo.com 12345678",
        ],
    )
    .await?;

    assert_eq!(session.expenses().ledger().len(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_switching_user_resets_expenses() -> Result<()> {
    let mut session = new_session();

    run_lines(
        &mut session,
        &[
            "login usuario@demo.com 12345678",
            "add 100 -c food --date 2024-10-01",
            "login test@gastocontrol.com password123",
        ],
    )
    .await?;

    assert!(session.expenses().ledger().is_empty());
    assert_eq!(
        session.user().map(|u| u.email.as_str()),
        Some("test@gastocontrol.com")
    );
    Ok(())
}
