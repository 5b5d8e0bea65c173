//! Transaction history CLI commands
//!
//! `list` and `export` share the same filter and sort flags, so what is
//! exported is exactly what `list` shows.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::display::format_history_table;
use crate::error::{FintrackError, FintrackResult};
use crate::export::export_history_csv;
use crate::reports::{
    HistoryFilter, HistoryReport, HistorySort, KindFilter, SortDirection, SortField,
};
use crate::storage::Storage;

use super::{parse_date, today};

/// Filter and sort flags for the history view
#[derive(Args, Debug, Clone, Default)]
pub struct HistoryQuery {
    /// Case-insensitive text to look for in type, category, amount or date
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only income or only expenses
    #[arg(short, long, value_enum, default_value = "all")]
    pub kind: KindFilter,

    /// Earliest date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Category or income type to include (repeatable)
    #[arg(short, long = "category")]
    pub categories: Vec<String>,

    /// Sort field; without it the newest-first order is kept
    #[arg(long, value_enum)]
    pub sort: Option<SortField>,

    /// Sort direction
    #[arg(long, value_enum, default_value = "desc")]
    pub direction: SortDirection,
}

impl HistoryQuery {
    pub fn filter(&self) -> FintrackResult<HistoryFilter> {
        Ok(HistoryFilter {
            search: self.search.clone(),
            kind: self.kind,
            from: self.from.as_deref().map(parse_date).transpose()?,
            to: self.to.as_deref().map(parse_date).transpose()?,
            labels: self.categories.iter().cloned().collect(),
        })
    }

    pub fn sort(&self) -> HistorySort {
        HistorySort::new(self.sort, self.direction)
    }
}

/// History subcommands
#[derive(Subcommand)]
pub enum HistoryCommands {
    /// Show income and expenses together, newest first
    List {
        #[command(flatten)]
        query: HistoryQuery,
    },

    /// List the categories and income types present in the history
    Labels,

    /// Write the filtered history as CSV
    Export {
        #[command(flatten)]
        query: HistoryQuery,

        /// Output file, or "-" for stdout (defaults to exports/transactions-<date>.csv)
        #[arg(short, long)]
        output: Option<String>,
    },
}

pub fn handle_history_command(storage: &Storage, cmd: HistoryCommands) -> FintrackResult<()> {
    match cmd {
        HistoryCommands::List { query } => {
            let report = HistoryReport::generate(storage, &query.filter()?, &query.sort())?;
            print!("{}", format_history_table(&report.entries));
            println!("{}", report.format_summary());
        }

        HistoryCommands::Labels => {
            let report =
                HistoryReport::generate(storage, &HistoryFilter::default(), &HistorySort::default())?;
            for label in &report.labels {
                println!("{}", label);
            }
        }

        HistoryCommands::Export { query, output } => {
            let report = HistoryReport::generate(storage, &query.filter()?, &query.sort())?;

            match output.as_deref() {
                Some("-") => {
                    let stdout = io::stdout();
                    export_history_csv(&report.entries, stdout.lock())?;
                }
                other => {
                    let path = match other {
                        Some(path) => PathBuf::from(path),
                        None => storage.paths().history_export_file(today()),
                    };
                    let rows = write_csv_file(&path, &report)?;
                    println!("Exported {} transaction(s) to: {}", rows, path.display());
                }
            }
        }
    }

    Ok(())
}

fn write_csv_file(path: &Path, report: &HistoryReport) -> FintrackResult<usize> {
    let file = File::create(path).map_err(|e| {
        FintrackError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    let rows = export_history_csv(&report.entries, &mut writer)?;
    writer
        .flush()
        .map_err(|e| FintrackError::Export(e.to_string()))?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_query_to_filter() {
        let query = HistoryQuery {
            search: Some("food".into()),
            kind: KindFilter::Expense,
            from: Some("2024-01-01".into()),
            to: None,
            categories: vec!["Food".into(), "Food".into()],
            sort: Some(SortField::Amount),
            direction: SortDirection::Asc,
        };

        let filter = query.filter().unwrap();
        assert_eq!(filter.from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(filter.labels.len(), 1);
        assert_eq!(query.sort(), HistorySort::new(Some(SortField::Amount), SortDirection::Asc));
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let query = HistoryQuery {
            to: Some("yesterday".into()),
            ..Default::default()
        };
        assert!(query.filter().unwrap_err().is_validation());
    }
}
