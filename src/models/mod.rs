//! Core data models for fintrack
//!
//! Incomes, expenses and budgets are the persisted records; the transaction
//! view is the merged read-only projection used by history and export.

pub mod budget;
pub mod expense;
pub mod ids;
pub mod income;
pub mod money;
pub mod transaction;
pub mod user;

pub use budget::{BudgetRecord, BudgetStatus, BudgetValidationError};
pub use expense::{ExpenseCategory, ExpenseRecord, ExpenseValidationError, NewExpense};
pub use ids::{BudgetId, ExpenseId, IncomeId, UserId};
pub use income::{IncomeRecord, IncomeType, IncomeValidationError, NewIncome};
pub use money::{Money, MoneyParseError};
pub use transaction::{TransactionKind, TransactionView};
pub use user::{User, UserRole, UserValidationError, DEFAULT_PROFILE_PICTURE};
