//! Configuration module for fintrack
//!
//! - Path resolution (env override or platform config dir)
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FintrackPaths;
pub use settings::{BudgetSpentMode, MonthWindow, Settings};
