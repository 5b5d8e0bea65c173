//! Export module for fintrack
//!
//! - CSV: the filtered transaction history (spreadsheet-compatible)
//! - JSON: machine-readable snapshot of every record
//! - YAML: human-readable snapshot of every record

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_history_csv, HISTORY_CSV_HEADER};
pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
