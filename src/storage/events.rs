//! Change notifications emitted after each persisted mutation

use crate::models::{BudgetId, ExpenseId, IncomeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    IncomeAdded(IncomeId),
    IncomeDeleted(IncomeId),
    IncomesCleared { removed: usize },
    ExpenseAdded(ExpenseId),
    ExpenseDeleted(ExpenseId),
    ExpensesCleared { removed: usize },
    BudgetUpdated(BudgetId),
    BudgetDeleted(BudgetId),
}

/// Observer callback; runs synchronously on the mutating thread
pub type Subscriber = Box<dyn Fn(&StoreEvent) + Send + Sync>;
