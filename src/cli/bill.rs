//! Bill CLI commands

use chrono::Local;
use clap::Subcommand;

use super::{parse_amount, parse_date, payment_time};
use crate::config::Settings;
use crate::display::bill::{format_bill_details, format_bill_list};
use crate::display::transaction::format_transaction_details;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{BillId, NewBill};
use crate::state::LedgerState;

/// Bill subcommands
#[derive(Subcommand, Debug)]
pub enum BillCommands {
    /// Register a new pending bill
    Add {
        /// What the bill is for
        description: String,
        /// Amount (e.g., "189.90")
        amount: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,
        /// Ledger account the bill is paid from
        #[arg(short, long, default_value = "Main")]
        account: String,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List bills by due date
    List {
        /// Only pending bills
        #[arg(long)]
        pending: bool,
    },
    /// Show bill details
    Show {
        /// Bill ID
        id: String,
    },
    /// Pay a bill, recording the settling expense
    Pay {
        /// Bill ID
        id: String,
        /// Payment date (YYYY-MM-DD), defaults to now
        #[arg(long)]
        paid_at: Option<String>,
    },
}

/// Handle a bill command
pub async fn handle_bill_command(
    state: &LedgerState,
    settings: &Settings,
    cmd: BillCommands,
) -> LedgerResult<()> {
    let symbol = settings.currency_symbol.as_str();
    let today = Local::now().date_naive();

    match cmd {
        BillCommands::Add {
            description,
            amount,
            due,
            account,
            notes,
        } => {
            let amount = parse_amount(&amount)?;
            let due = parse_date(&due, &settings.date_format)?;

            let mut input = NewBill::new(description, amount, due, account);
            if let Some(notes) = notes {
                input = input.with_notes(notes);
            }
            let bill = state.add_bill(input).await?;

            println!("Created bill:");
            print!("{}", format_bill_details(&bill, today, symbol));
        }

        BillCommands::List { pending } => {
            let bills = state.fetch_bills().await?;
            let shown: Vec<_> = bills
                .into_iter()
                .filter(|b| !pending || b.is_pending())
                .collect();
            print!("{}", format_bill_list(&shown, today, symbol));
        }

        BillCommands::Show { id } => {
            let bills = state.fetch_bills().await?;
            let bill = bills
                .iter()
                .find(|b| b.id.as_str() == id)
                .ok_or_else(|| LedgerError::bill_not_found(&id))?;
            print!("{}", format_bill_details(bill, today, symbol));
        }

        BillCommands::Pay { id, paid_at } => {
            let paid_at = match paid_at {
                Some(s) => Some(payment_time(parse_date(&s, &settings.date_format)?)?),
                None => None,
            };

            state.fetch_bills().await?;
            let payment = state.pay_bill(&BillId::from(id), paid_at).await?;

            match &payment.transaction {
                Some(txn) => {
                    println!(
                        "Paid '{}' ({}).",
                        payment.bill.description,
                        payment.bill.amount.format_with_symbol(symbol)
                    );
                    print!("{}", format_transaction_details(txn, symbol));
                }
                None => println!(
                    "Bill '{}' is already paid; nothing recorded.",
                    payment.bill.description
                ),
            }
        }
    }

    Ok(())
}
