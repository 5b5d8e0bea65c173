//! Budget service
//!
//! Category budgets are keyed by id in the store. `set_budget` is the
//! planner entry point: it looks up any existing budget for the category,
//! snapshots current spending and upserts under the existing id.

use tracing::{debug, info};

use crate::audit::EntityType;
use crate::config::BudgetSpentMode;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{BudgetId, BudgetRecord, BudgetStatus, ExpenseCategory, Money};
use crate::storage::{Storage, StoreEvent};

use super::expense::spent_in;
use super::resolve_reference;

/// Service for category budgets
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// A budget together with its computed utilization
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLine {
    pub budget: BudgetRecord,
    pub status: BudgetStatus,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Insert or replace a budget by id
    pub fn update_budget(&self, budget: BudgetRecord) -> FintrackResult<BudgetRecord> {
        budget
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;

        let previous = self.storage.finance.upsert_budget(budget.clone())?;
        self.storage.finance.save()?;

        match &previous {
            Some(before) => self.storage.log_update(
                EntityType::Budget,
                budget.id.to_string(),
                Some(budget.category.clone()),
                before,
                &budget,
                diff_summary(before, &budget),
            )?,
            None => self.storage.log_create(
                EntityType::Budget,
                budget.id.to_string(),
                Some(budget.category.clone()),
                &budget,
            )?,
        }
        self.storage.notify(StoreEvent::BudgetUpdated(budget.id));

        info!(
            id = %budget.id,
            category = %budget.category,
            limit = %budget.limit,
            replaced = previous.is_some(),
            "budget saved"
        );
        Ok(budget)
    }

    /// Set the limit for a category, snapshotting what has been spent so far
    pub fn set_budget(&self, category: &str, limit: Money) -> FintrackResult<BudgetRecord> {
        let category = canonical_category(category);
        let spent = spent_in(&self.storage.finance.expenses()?, &category);

        let record = match self.storage.finance.budget_for_category(&category)? {
            Some(existing) => BudgetRecord {
                limit,
                spent,
                ..existing
            },
            None => BudgetRecord::new(&category, limit, spent),
        };
        debug!(%category, spent = %spent, "budget spent snapshot");

        self.update_budget(record)
    }

    /// Remove a budget; `false` when nothing had that id
    pub fn delete_budget(&self, id: BudgetId) -> FintrackResult<bool> {
        let Some(removed) = self.storage.finance.remove_budget(id)? else {
            return Ok(false);
        };
        self.storage.finance.save()?;

        self.storage.log_delete(
            EntityType::Budget,
            removed.id.to_string(),
            Some(removed.category.clone()),
            &removed,
        )?;
        self.storage.notify(StoreEvent::BudgetDeleted(id));

        info!(id = %id, category = %removed.category, "budget deleted");
        Ok(true)
    }

    pub fn list(&self) -> FintrackResult<Vec<BudgetRecord>> {
        self.storage.finance.budgets()
    }

    /// Every budget with its utilization, in insertion order
    pub fn list_with_status(&self, mode: BudgetSpentMode) -> FintrackResult<Vec<BudgetLine>> {
        let expenses = match mode {
            BudgetSpentMode::Snapshot => Vec::new(),
            BudgetSpentMode::Live => self.storage.finance.expenses()?,
        };

        Ok(self
            .list()?
            .into_iter()
            .map(|budget| {
                let status = match mode {
                    BudgetSpentMode::Snapshot => budget.status(),
                    BudgetSpentMode::Live => {
                        budget.status_with_spent(spent_in(&expenses, &budget.category))
                    }
                };
                BudgetLine { budget, status }
            })
            .collect())
    }

    /// Resolve a budget by id reference or category name
    pub fn resolve(&self, reference: &str) -> FintrackResult<Option<BudgetId>> {
        if let Some(budget) = self.storage.finance.budget_for_category(reference)? {
            return Ok(Some(budget.id));
        }
        let ids: Vec<_> = self.list()?.into_iter().map(|b| b.id).collect();
        resolve_reference("Budget", ids, reference, |id, r| id.matches_reference(r))
    }
}

/// Known expense categories take their canonical spelling; other text is kept trimmed
fn canonical_category(input: &str) -> String {
    match input.parse::<ExpenseCategory>() {
        Ok(category) => category.name().to_string(),
        Err(_) => input.trim().to_string(),
    }
}

fn diff_summary(before: &BudgetRecord, after: &BudgetRecord) -> Option<String> {
    let mut changes = Vec::new();
    if before.category != after.category {
        changes.push(format!("category: {} -> {}", before.category, after.category));
    }
    if before.limit != after.limit {
        changes.push(format!("limit: {} -> {}", before.limit, after.limit));
    }
    if before.spent != after.spent {
        changes.push(format!("spent: {} -> {}", before.spent, after.spent));
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}
