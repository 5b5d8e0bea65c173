//! CSV export of the transaction history
//!
//! One row per view in the order given, amounts as fixed two-decimal text.

use std::io::Write;

use serde::Serialize;

use crate::error::FintrackResult;
use crate::models::TransactionView;

pub const HISTORY_CSV_HEADER: [&str; 4] = ["Date", "Type", "Category", "Amount"];

#[derive(Serialize)]
struct HistoryRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Type")]
    kind: &'static str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
}

/// Write the views as CSV, header first; returns the number of data rows
pub fn export_history_csv<W: Write>(views: &[TransactionView], writer: W) -> FintrackResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if views.is_empty() {
        csv_writer.write_record(HISTORY_CSV_HEADER)?;
    }

    for view in views {
        csv_writer.serialize(HistoryRow {
            date: view.date().to_string(),
            kind: view.kind().as_str(),
            category: view.label(),
            amount: view.amount().to_decimal_string(),
        })?;
    }

    csv_writer.flush()?;
    tracing::debug!(rows = views.len(), "history exported as CSV");
    Ok(views.len())
}
