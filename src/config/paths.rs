//! Path management for fintrack
//!
//! ## Path Resolution Order
//!
//! 1. `FINTRACK_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories` joined with `fintrack`
//!    (`~/.config/fintrack` on Linux, `%APPDATA%\fintrack` on Windows)

use std::path::PathBuf;

use chrono::NaiveDate;
use directories::BaseDirs;

use crate::error::FintrackError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "FINTRACK_DATA_DIR";

/// Name of the persisted finance blob
const FINANCE_STORAGE_NAME: &str = "finance-storage";

/// Manages all paths used by fintrack
#[derive(Debug, Clone)]
pub struct FintrackPaths {
    base_dir: PathBuf,
}

impl FintrackPaths {
    /// Resolve paths from the environment or the platform config directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FintrackError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding persisted state
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Default destination for CSV exports
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// The single blob holding incomes, expenses and budgets
    pub fn finance_file(&self) -> PathBuf {
        self.data_dir().join(format!("{}.json", FINANCE_STORAGE_NAME))
    }

    /// Persisted authentication session
    pub fn session_file(&self) -> PathBuf {
        self.data_dir().join("session.json")
    }

    /// Default export file for a given day: `transactions-<date>.csv`
    pub fn history_export_file(&self, date: NaiveDate) -> PathBuf {
        self.export_dir()
            .join(format!("transactions-{}.csv", date.format("%Y-%m-%d")))
    }

    /// Ensure the base, data and export directories exist
    pub fn ensure_directories(&self) -> Result<(), FintrackError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FintrackError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FintrackError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir()).map_err(|e| {
            FintrackError::Io(format!("Failed to create export directory: {}", e))
        })?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, FintrackError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| FintrackError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("fintrack"))
}
