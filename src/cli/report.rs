//! Summary, calendar and consistency-check commands

use chrono::Local;

use crate::config::Settings;
use crate::display::bill::format_calendar;
use crate::error::{LedgerError, LedgerResult};
use crate::reports::{calendar_events, DashboardSummary};
use crate::state::LedgerState;

/// Print the dashboard summary over the last `months` months
pub async fn handle_summary_command(
    state: &LedgerState,
    settings: &Settings,
    months: Option<usize>,
) -> LedgerResult<()> {
    let months = months.unwrap_or(settings.monthly_window);
    if months == 0 {
        return Err(LedgerError::Validation("--months must be at least 1".into()));
    }

    state.refresh().await?;
    let current = state.current();
    let summary = DashboardSummary::generate(
        &current.transactions,
        &current.bills,
        Local::now().date_naive(),
        months,
    );

    print!("{}", summary.format_terminal(&settings.currency_symbol));
    Ok(())
}

pub async fn handle_calendar_command(state: &LedgerState, settings: &Settings) -> LedgerResult<()> {
    let bills = state.fetch_bills().await?;
    let events = calendar_events(&bills, &settings.currency_symbol);
    print!("{}", format_calendar(&events));
    Ok(())
}

/// Verify the bill-linkage invariant of the stored ledger
pub async fn handle_check_command(state: &LedgerState) -> LedgerResult<()> {
    let snapshot = state.service().snapshot().await?;
    let violations = snapshot.link_violations();

    if violations.is_empty() {
        println!(
            "Ledger OK: {} transactions, {} bills.",
            snapshot.transactions.len(),
            snapshot.bills.len()
        );
        return Ok(());
    }

    for violation in &violations {
        println!("  {}", violation);
    }
    Err(LedgerError::Validation(format!(
        "{} bill-link violation(s) found",
        violations.len()
    )))
}
