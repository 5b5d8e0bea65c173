//! Finance repository
//!
//! Holds the three record collections in memory and persists them together
//! as one JSON blob. The repository performs no validation; callers are
//! expected to hand it well-formed records.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FintrackError;
use crate::models::{
    BudgetId, BudgetRecord, ExpenseId, ExpenseRecord, IncomeId, IncomeRecord,
};

use super::file_io::{read_json, write_json_atomic};

/// Serialized shape of the store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceData {
    #[serde(default)]
    pub incomes: Vec<IncomeRecord>,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    #[serde(default)]
    pub budgets: Vec<BudgetRecord>,
}

/// In-memory record collections backed by a single file
pub struct FinanceRepository {
    path: PathBuf,
    data: RwLock<FinanceData>,
}

impl FinanceRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(FinanceData::default()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, FinanceData>, FinanceLockError> {
        self.data.read().map_err(|_| FinanceLockError)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, FinanceData>, FinanceLockError> {
        self.data.write().map_err(|_| FinanceLockError)
    }

    /// Replace in-memory state with the persisted snapshot
    pub fn load(&self) -> Result<(), FintrackError> {
        let file_data: FinanceData = read_json(&self.path)?;
        debug!(
            incomes = file_data.incomes.len(),
            expenses = file_data.expenses.len(),
            budgets = file_data.budgets.len(),
            "loaded finance storage"
        );
        *self.write()? = file_data;
        Ok(())
    }

    /// Overwrite the persisted snapshot with in-memory state
    pub fn save(&self) -> Result<(), FintrackError> {
        let data = self.read()?;
        write_json_atomic(&self.path, &*data)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> Result<FinanceData, FintrackError> {
        Ok(self.read()?.clone())
    }

    pub fn incomes(&self) -> Result<Vec<IncomeRecord>, FintrackError> {
        Ok(self.read()?.incomes.clone())
    }

    pub fn expenses(&self) -> Result<Vec<ExpenseRecord>, FintrackError> {
        Ok(self.read()?.expenses.clone())
    }

    pub fn budgets(&self) -> Result<Vec<BudgetRecord>, FintrackError> {
        Ok(self.read()?.budgets.clone())
    }

    /// The budget currently held for a category (case-insensitive), if any
    pub fn budget_for_category(&self, category: &str) -> Result<Option<BudgetRecord>, FintrackError> {
        let category = category.trim();
        Ok(self
            .read()?
            .budgets
            .iter()
            .find(|b| b.category.eq_ignore_ascii_case(category))
            .cloned())
    }

    pub fn push_income(&self, record: IncomeRecord) -> Result<(), FintrackError> {
        self.write()?.incomes.push(record);
        Ok(())
    }

    pub fn push_expense(&self, record: ExpenseRecord) -> Result<(), FintrackError> {
        self.write()?.expenses.push(record);
        Ok(())
    }

    /// Remove an income; `None` when no record has that id
    pub fn remove_income(&self, id: IncomeId) -> Result<Option<IncomeRecord>, FintrackError> {
        let mut data = self.write()?;
        let position = data.incomes.iter().position(|i| i.id == id);
        Ok(position.map(|idx| data.incomes.remove(idx)))
    }

    pub fn remove_expense(&self, id: ExpenseId) -> Result<Option<ExpenseRecord>, FintrackError> {
        let mut data = self.write()?;
        let position = data.expenses.iter().position(|e| e.id == id);
        Ok(position.map(|idx| data.expenses.remove(idx)))
    }

    pub fn remove_budget(&self, id: BudgetId) -> Result<Option<BudgetRecord>, FintrackError> {
        let mut data = self.write()?;
        let position = data.budgets.iter().position(|b| b.id == id);
        Ok(position.map(|idx| data.budgets.remove(idx)))
    }

    /// Empty the income collection, returning what was removed
    pub fn take_incomes(&self) -> Result<Vec<IncomeRecord>, FintrackError> {
        Ok(std::mem::take(&mut self.write()?.incomes))
    }

    pub fn take_expenses(&self) -> Result<Vec<ExpenseRecord>, FintrackError> {
        Ok(std::mem::take(&mut self.write()?.expenses))
    }

    /// Drop any budget with the same id, then append; returns the replaced record
    pub fn upsert_budget(&self, record: BudgetRecord) -> Result<Option<BudgetRecord>, FintrackError> {
        let mut data = self.write()?;
        let position = data.budgets.iter().position(|b| b.id == record.id);
        let previous = position.map(|idx| data.budgets.remove(idx));
        data.budgets.push(record);
        Ok(previous)
    }
}

/// A poisoned lock means a previous mutation panicked mid-way
#[derive(Debug)]
struct FinanceLockError;

impl From<FinanceLockError> for FintrackError {
    fn from(_: FinanceLockError) -> Self {
        FintrackError::Storage("Finance storage lock poisoned".into())
    }
}
