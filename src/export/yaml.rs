//! YAML Export functionality
//!
//! Same snapshot as the JSON export, for reading by eye.

use std::io::Write;

use crate::error::{FintrackError, FintrackResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> FintrackResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(writer, "# fintrack data export")
        .and_then(|_| writeln!(writer, "# Generated: {}", export.exported_at))
        .and_then(|_| writeln!(writer, "# App Version: {}", export.app_version))
        .and_then(|_| writeln!(writer))
        .map_err(|e| FintrackError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export)?;
    Ok(())
}

/// Parse and validate a YAML export
pub fn read_yaml_export(yaml_str: &str) -> FintrackResult<FullExport> {
    let export: FullExport = serde_yaml::from_str(yaml_str)?;
    export.validate().map_err(FintrackError::Export)?;
    Ok(export)
}
