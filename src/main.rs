use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use ledger_store::cli::{
    handle_bill_command, handle_calendar_command, handle_check_command, handle_export_command,
    handle_summary_command, handle_theme_command, handle_transaction_command,
    handle_user_command, BillCommands, ExportFormat, TransactionCommands, UserCommands,
};
use ledger_store::config::{LedgerPaths, Settings};
use ledger_store::error::LedgerError;
use ledger_store::logging::init_tracing;
use ledger_store::services::{Latency, LedgerService};
use ledger_store::state::LedgerState;
use ledger_store::storage::open_store;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Income, expense and bill tracking from the command line",
    long_about = "ledger records income and expense transactions, tracks bills \
                  and their payments, and summarizes the results. Data is kept \
                  in a single JSON snapshot under the ledger directory."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Bill commands
    #[command(subcommand)]
    Bill(BillCommands),

    /// Show or set the theme preference (light, dark, system)
    Theme { theme: Option<String> },

    /// User identity commands
    #[command(subcommand)]
    User(UserCommands),

    /// Totals, bills due and the monthly series
    Summary {
        /// Number of months in the series
        #[arg(short, long)]
        months: Option<usize>,
    },

    /// Bills laid out by due date
    Calendar,

    /// Export the ledger
    Export {
        #[arg(value_enum)]
        format: ExportFormat,
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Verify that every paid bill has exactly one settling transaction
    Check,

    /// Discard all ledger data and start over from the demo data
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration and paths
    Config {
        /// Write the current settings to config.json
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run(Cli::parse()).await {
        match err.downcast_ref::<LedgerError>() {
            Some(ledger_err) => {
                tracing::debug!(error = %ledger_err, "command failed");
                eprintln!("Error: {}", ledger_err.user_message());
            }
            None => eprintln!("Error: {:#}", err),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let store = open_store(&paths, &settings.storage_key);
    let service = LedgerService::new(store, Latency::from_settings(&settings.latency));
    let state = LedgerState::new(Arc::new(service));

    match cli.command {
        Some(Commands::Txn(cmd)) => handle_transaction_command(&state, &settings, cmd).await?,
        Some(Commands::Bill(cmd)) => handle_bill_command(&state, &settings, cmd).await?,
        Some(Commands::Theme { theme }) => handle_theme_command(&state, theme).await?,
        Some(Commands::User(cmd)) => handle_user_command(&state, cmd).await?,
        Some(Commands::Summary { months }) => {
            handle_summary_command(&state, &settings, months).await?
        }
        Some(Commands::Calendar) => handle_calendar_command(&state, &settings).await?,
        Some(Commands::Export {
            format,
            output,
            pretty,
        }) => handle_export_command(&state, &paths, format, output, pretty).await?,
        Some(Commands::Check) => handle_check_command(&state).await?,
        Some(Commands::Reset { force }) => {
            if !force {
                println!("This discards every transaction, bill and preference.");
                println!("Run 'ledger reset --force' to confirm.");
                return Ok(());
            }
            state.reset().await?;
            println!("Ledger reset to demo data.");
        }
        Some(Commands::Config { write }) => {
            if write {
                settings.save(&paths)?;
            }
            println!("Ledger Store Configuration");
            println!("==========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data file:        {}", paths.snapshot_file(&settings.storage_key).display());
            println!("Export directory: {}", paths.export_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!(
                "  Latency:        {}-{} ms",
                settings.latency.min_ms, settings.latency.max_ms
            );
            println!("  Monthly window: {} months", settings.monthly_window);
            println!("  Currency:       {}", settings.currency_symbol);
            println!("  Date format:    {}", settings.date_format);
            if !state.service().is_durable() {
                println!();
                println!("Warning: storage is unavailable; changes will not be saved.");
            }
        }
        None => {
            println!("ledger - income, expense and bill tracking");
            println!();
            println!("Run 'ledger --help' for usage information.");
            println!("Run 'ledger summary' for an overview.");
        }
    }

    Ok(())
}
