//! Transaction CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_date_or_today};
use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{NewTransaction, TransactionKind};
use crate::state::LedgerState;

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// income or expense
        kind: String,
        /// Amount (e.g., "189.90")
        amount: String,
        /// Category
        #[arg(short, long)]
        category: String,
        /// Ledger account
        #[arg(short, long, default_value = "Main")]
        account: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Description; defaults to the category
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle a transaction command
pub async fn handle_transaction_command(
    state: &LedgerState,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            account,
            date,
            description,
        } => {
            let kind: TransactionKind = kind.parse().map_err(LedgerError::Validation)?;
            let amount = parse_amount(&amount)?;
            let date = parse_date_or_today(date.as_deref(), &settings.date_format)?;

            let input = NewTransaction::new(kind, category, amount, date, account)
                .with_description(description.unwrap_or_default());
            let txn = state.create_transaction(input).await?;

            println!("Recorded transaction:");
            print!("{}", format_transaction_details(&txn, symbol));
        }

        TransactionCommands::List { limit } => {
            let transactions = state.fetch_transactions().await?;
            let shown: Vec<_> = transactions.into_iter().take(limit).collect();
            print!("{}", format_transaction_register(&shown, symbol));
        }
    }

    Ok(())
}
