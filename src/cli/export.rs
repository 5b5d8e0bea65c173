//! CLI commands for full data export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::error::{FintrackError, FintrackResult};
use crate::export::{export_full_json, export_full_yaml, FullExport};
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON (machine-readable)
    Json,
    /// YAML (human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export every income, expense and budget to a file
    All {
        /// Output file path
        output: PathBuf,

        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show what an export would contain without writing a file
    Info,
}

pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> FintrackResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let file = File::create(&output).map_err(|e| {
                FintrackError::Export(format!(
                    "Failed to create file {}: {}",
                    output.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(file);

            match format {
                ExportFormat::Json => export_full_json(storage, &mut writer, pretty)?,
                ExportFormat::Yaml => export_full_yaml(storage, &mut writer)?,
            }
            writer
                .flush()
                .map_err(|e| FintrackError::Export(e.to_string()))?;

            println!("Full data exported to: {}", output.display());
        }

        ExportCommands::Info => {
            let export = FullExport::from_storage(storage)?;
            let meta = &export.metadata;

            println!("Export Information");
            println!("==================");
            println!("Schema version: {}", export.schema_version);
            println!("App version:    {}", export.app_version);
            println!("Incomes:        {}", meta.income_count);
            println!("Expenses:       {}", meta.expense_count);
            println!("Budgets:        {}", meta.budget_count);
            if let (Some(earliest), Some(latest)) =
                (&meta.earliest_transaction, &meta.latest_transaction)
            {
                println!("Date range:     {} to {}", earliest, latest);
            }
        }
    }

    Ok(())
}
