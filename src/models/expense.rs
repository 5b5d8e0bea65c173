//! Expense records and the fixed expense category set

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::ExpenseId;
use super::money::Money;

/// Fixed set of expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum ExpenseCategory {
    Housing,
    Transportation,
    Food,
    Utilities,
    Insurance,
    Healthcare,
    Entertainment,
    Shopping,
    #[default]
    Other,
}

impl ExpenseCategory {
    /// Every category, in display order
    pub fn all() -> &'static [ExpenseCategory] {
        &[
            Self::Housing,
            Self::Transportation,
            Self::Food,
            Self::Utilities,
            Self::Insurance,
            Self::Healthcare,
            Self::Entertainment,
            Self::Shopping,
            Self::Other,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Transportation => "Transportation",
            Self::Food => "Food",
            Self::Utilities => "Utilities",
            Self::Insurance => "Insurance",
            Self::Healthcare => "Healthcare",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExpenseCategory {
    type Err = ExpenseValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ExpenseValidationError::UnknownCategory(needle.to_string()))
    }
}

/// Validation errors for expense input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount,
    MissingType,
    UnknownCategory(String),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Amount must be greater than 0"),
            Self::MissingType => write!(f, "Type is required"),
            Self::UnknownCategory(c) => write!(f, "Unknown expense category '{}'", c),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// Expense input as submitted, before an identifier is assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: Money,
    /// Free-text label, e.g. "groceries" or "rent"
    #[serde(rename = "type")]
    pub expense_type: String,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
}

impl NewExpense {
    pub fn new(
        amount: Money,
        expense_type: impl Into<String>,
        category: ExpenseCategory,
        date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            expense_type: expense_type.into(),
            category,
            date,
        }
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        if self.expense_type.trim().is_empty() {
            return Err(ExpenseValidationError::MissingType);
        }
        Ok(())
    }
}

/// A persisted expense record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub amount: Money,
    #[serde(rename = "type")]
    pub expense_type: String,
    #[serde(default)]
    pub category: ExpenseCategory,
    pub date: NaiveDate,
}

impl ExpenseRecord {
    pub fn from_new(input: NewExpense) -> Self {
        Self {
            id: ExpenseId::new(),
            amount: input.amount,
            expense_type: input.expense_type,
            category: input.category,
            date: input.date,
        }
    }
}
