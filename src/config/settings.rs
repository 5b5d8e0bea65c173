//! User settings for fintrack
//!
//! Holds display preferences, tax calculator defaults, and the two policy
//! switches the dashboard and budget planner depend on.

use serde::{Deserialize, Serialize};

use super::paths::FintrackPaths;
use crate::error::FintrackError;

/// How the dashboard decides which records belong to a trailing month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MonthWindow {
    /// Match year and month
    #[default]
    Calendar,
    /// Match the month number only, merging the same month across years
    MonthOfYear,
}

/// Where a budget's `spent` figure comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetSpentMode {
    /// Value captured when the budget was last set
    #[default]
    Snapshot,
    /// Recomputed from current expenses on every read
    Live,
}

/// User settings for fintrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Number of months in the dashboard series
    #[serde(default = "default_trailing_months")]
    pub trailing_months: u32,

    #[serde(default)]
    pub month_window: MonthWindow,

    #[serde(default)]
    pub budget_spent: BudgetSpentMode,

    /// Tax rate (percent) used when none is given
    #[serde(default = "default_tax_rate")]
    pub default_tax_rate: f64,

    /// Deductions used when none are given, in cents
    #[serde(default)]
    pub default_deductions_cents: i64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_trailing_months() -> u32 {
    6
}

fn default_tax_rate() -> f64 {
    20.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            trailing_months: default_trailing_months(),
            month_window: MonthWindow::default(),
            budget_spent: BudgetSpentMode::default(),
            default_tax_rate: default_tax_rate(),
            default_deductions_cents: 0,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FintrackPaths) -> Result<Self, FintrackError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FintrackError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| FintrackError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FintrackPaths) -> Result<(), FintrackError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FintrackError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FintrackError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.trailing_months, 6);
        assert_eq!(settings.month_window, MonthWindow::Calendar);
        assert_eq!(settings.budget_spent, BudgetSpentMode::Snapshot);
        assert_eq!(settings.default_tax_rate, 20.0);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            month_window: MonthWindow::MonthOfYear,
            budget_spent: BudgetSpentMode::Live,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.month_window, MonthWindow::MonthOfYear);
        assert_eq!(loaded.budget_spent, BudgetSpentMode::Live);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"month_window": "month-of-year"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.month_window, MonthWindow::MonthOfYear);
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.trailing_months, 6);
    }
}
