//! Expense service

use tracing::info;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{FintrackError, FintrackResult};
use crate::models::{
    ExpenseCategory, ExpenseId, ExpenseRecord, ExpenseValidationError, Money, NewExpense,
};
use crate::storage::{Storage, StoreEvent};

use super::resolve_reference;

pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn add(&self, input: NewExpense) -> FintrackResult<ExpenseRecord> {
        input
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        let record = ExpenseRecord::from_new(input);
        self.storage.finance.push_expense(record.clone())?;
        self.storage.finance.save()?;

        self.storage.log_create(
            EntityType::Expense,
            record.id.to_string(),
            Some(describe(&record)),
            &record,
        )?;
        self.storage.notify(StoreEvent::ExpenseAdded(record.id));

        info!(id = %record.id, amount = %record.amount, category = %record.category, "expense added");
        Ok(record)
    }

    /// Remove an expense; `false` when nothing had that id
    pub fn delete(&self, id: ExpenseId) -> FintrackResult<bool> {
        let Some(removed) = self.storage.finance.remove_expense(id)? else {
            return Ok(false);
        };
        self.storage.finance.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            removed.id.to_string(),
            Some(describe(&removed)),
            &removed,
        )?;
        self.storage.notify(StoreEvent::ExpenseDeleted(id));

        info!(id = %id, "expense deleted");
        Ok(true)
    }

    pub fn clear(&self) -> FintrackResult<usize> {
        let removed = self.storage.finance.take_expenses()?;
        self.storage.finance.save()?;

        let entries: Vec<_> = removed
            .iter()
            .map(|r| AuditEntry::delete(EntityType::Expense, r.id.to_string(), Some(describe(r)), r))
            .collect();
        self.storage.log_batch(&entries)?;
        self.storage.notify(StoreEvent::ExpensesCleared {
            removed: removed.len(),
        });

        info!(count = removed.len(), "expenses cleared");
        Ok(removed.len())
    }

    pub fn list(&self) -> FintrackResult<Vec<ExpenseRecord>> {
        self.storage.finance.expenses()
    }

    pub fn total(&self) -> FintrackResult<Money> {
        Ok(self.list()?.iter().map(|e| e.amount).sum())
    }

    /// Current spending in a category, matched by category name
    pub fn spent_in(&self, category: &str) -> FintrackResult<Money> {
        Ok(spent_in(&self.list()?, category))
    }

    pub fn resolve(&self, reference: &str) -> FintrackResult<Option<ExpenseId>> {
        let ids: Vec<_> = self.list()?.into_iter().map(|e| e.id).collect();
        resolve_reference("Expense", ids, reference, |id, r| id.matches_reference(r))
    }
}

/// Sum of expenses whose category name matches `category`, ignoring case
pub fn spent_in(expenses: &[ExpenseRecord], category: &str) -> Money {
    let category = category.trim();
    expenses
        .iter()
        .filter(|e| e.category.name().eq_ignore_ascii_case(category))
        .map(|e| e.amount)
        .sum()
}

/// Parse a category name, falling back to Other when none is given
pub fn parse_category(name: Option<&str>) -> FintrackResult<ExpenseCategory> {
    match name {
        Some(name) => name
            .parse()
            .map_err(|e: ExpenseValidationError| FintrackError::Validation(e.to_string())),
        None => Ok(ExpenseCategory::default()),
    }
}

fn describe(record: &ExpenseRecord) -> String {
    format!("{} ({}) {} on {}", record.expense_type, record.category, record.amount, record.date)
}
