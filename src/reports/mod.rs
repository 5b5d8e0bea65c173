//! Reports module for fintrack
//!
//! Read-only views over the store: the dashboard aggregates and the merged
//! transaction history with its filter and sort pipeline.

pub mod dashboard;
pub mod history;

pub use dashboard::{CategorySlice, DashboardReport, MonthlyPoint, YearMonth};
pub use history::{
    distinct_labels, merge_history, HistoryFilter, HistoryReport, HistorySort, HistoryTotals,
    KindFilter, SortDirection, SortField,
};
