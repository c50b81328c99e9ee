//! CLI command for data export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::Local;
use clap::ValueEnum;

use crate::config::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{csv, json, yaml};
use crate::services::{sorted_bills, sorted_transactions};
use crate::state::LedgerState;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (transactions)
    Csv,
    /// CSV format (bills)
    BillsCsv,
    /// JSON format (full ledger)
    Json,
    /// YAML format (full ledger, human-readable)
    Yaml,
}

impl ExportFormat {
    fn extension(&self) -> &'static str {
        match self {
            Self::Csv | Self::BillsCsv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    fn file_stem(&self) -> &'static str {
        match self {
            Self::Csv => "transactions",
            Self::BillsCsv => "bills",
            Self::Json | Self::Yaml => "ledger",
        }
    }
}

/// Write an export, to `output` or a timestamped file in the export directory
pub async fn handle_export_command(
    state: &LedgerState,
    paths: &LedgerPaths,
    format: ExportFormat,
    output: Option<PathBuf>,
    pretty: bool,
) -> LedgerResult<()> {
    let snapshot = state.service().snapshot().await?;

    let output = match output {
        Some(path) => path,
        None => {
            let dir = paths.export_dir();
            std::fs::create_dir_all(&dir).map_err(|e| {
                LedgerError::Export(format!("Failed to create {}: {}", dir.display(), e))
            })?;
            dir.join(format!(
                "{}-{}.{}",
                format.file_stem(),
                Local::now().format("%Y%m%d-%H%M%S"),
                format.extension()
            ))
        }
    };

    let file = File::create(&output).map_err(|e| {
        LedgerError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => {
            let transactions = sorted_transactions(&snapshot.transactions);
            csv::export_transactions_csv(&transactions, &mut writer)?;
            println!(
                "Exported {} transactions to: {}",
                transactions.len(),
                output.display()
            );
        }
        ExportFormat::BillsCsv => {
            let bills = sorted_bills(&snapshot.bills);
            csv::export_bills_csv(&bills, &mut writer)?;
            println!("Exported {} bills to: {}", bills.len(), output.display());
        }
        ExportFormat::Json => {
            json::export_full_json(&snapshot, &mut writer, pretty)?;
            println!("Full ledger exported to: {}", output.display());
        }
        ExportFormat::Yaml => {
            yaml::export_full_yaml(&snapshot, &mut writer)?;
            println!("Full ledger exported to: {}", output.display());
        }
    }

    writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))
}
