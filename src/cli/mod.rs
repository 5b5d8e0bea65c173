//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod auth;
pub mod budget;
pub mod dashboard;
pub mod expense;
pub mod export;
pub mod history;
pub mod income;
pub mod tax;

pub use audit::handle_audit_command;
pub use auth::{handle_auth_command, handle_profile_command, AuthCommands, ProfileCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use dashboard::{handle_dashboard_command, DashboardArgs};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use history::{handle_history_command, HistoryCommands, HistoryQuery};
pub use income::{handle_income_command, IncomeCommands};
pub use tax::{handle_tax_command, TaxCommands};

use chrono::{Local, NaiveDate};

use crate::error::{FintrackError, FintrackResult};
use crate::models::Money;

/// Parse a user-entered amount ("100", "40.50", "$1,200")
pub(crate) fn parse_amount(input: &str) -> FintrackResult<Money> {
    Money::parse(input).map_err(|e| FintrackError::Validation(format!("Invalid amount: {}", e)))
}

/// Parse a `YYYY-MM-DD` date
pub(crate) fn parse_date(input: &str) -> FintrackResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        FintrackError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", input))
    })
}

/// Parse an optional date, defaulting to today
pub(crate) fn parse_date_or_today(input: Option<&str>) -> FintrackResult<NaiveDate> {
    match input {
        Some(s) => parse_date(s),
        None => Ok(today()),
    }
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
