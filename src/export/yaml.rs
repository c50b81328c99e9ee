//! YAML export of the full ledger

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::FullExport;
use crate::models::Snapshot;

/// Export the full ledger to YAML format
pub fn export_full_yaml<W: Write>(snapshot: &Snapshot, writer: &mut W) -> LedgerResult<()> {
    let export = FullExport::from_snapshot(snapshot);
    let export_err = |e: std::io::Error| LedgerError::Export(e.to_string());

    writeln!(writer, "# Ledger Store Export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}
