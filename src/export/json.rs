//! JSON Export functionality
//!
//! Exports every income, expense and budget with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FintrackError, FintrackResult};
use crate::models::{BudgetRecord, ExpenseRecord, IncomeRecord};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full store export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub incomes: Vec<IncomeRecord>,

    pub expenses: Vec<ExpenseRecord>,

    pub budgets: Vec<BudgetRecord>,

    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub income_count: usize,
    pub expense_count: usize,
    pub budget_count: usize,

    /// Earliest income or expense date
    pub earliest_transaction: Option<String>,

    /// Latest income or expense date
    pub latest_transaction: Option<String>,
}

impl FullExport {
    pub fn from_storage(storage: &Storage) -> FintrackResult<Self> {
        let data = storage.finance.snapshot()?;

        let dates = data
            .incomes
            .iter()
            .map(|i| i.date)
            .chain(data.expenses.iter().map(|e| e.date));
        let earliest_transaction = dates.clone().min().map(|d| d.to_string());
        let latest_transaction = dates.max().map(|d| d.to_string());

        let metadata = ExportMetadata {
            income_count: data.incomes.len(),
            expense_count: data.expenses.len(),
            budget_count: data.budgets.len(),
            earliest_transaction,
            latest_transaction,
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            incomes: data.incomes,
            expenses: data.expenses,
            budgets: data.budgets,
            metadata,
        })
    }

    /// Check schema version and that record counts agree with the metadata
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        if self.metadata.income_count != self.incomes.len()
            || self.metadata.expense_count != self.expenses.len()
            || self.metadata.budget_count != self.budgets.len()
        {
            return Err("Record counts do not match export metadata".to_string());
        }

        Ok(())
    }
}

/// Export the full store to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> FintrackResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| FintrackError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| FintrackError::Export(e.to_string()))?;

    Ok(())
}
