//! Merged transaction view
//!
//! History, filtering and export work over a single sequence that holds both
//! incomes and expenses. Each entry carries its original record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::expense::ExpenseRecord;
use super::income::IncomeRecord;
use super::money::Money;

/// Which collection a transaction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("Unknown transaction kind '{}'", other)),
        }
    }
}

/// Read-only projection of an income or expense record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionView {
    Income(IncomeRecord),
    Expense(ExpenseRecord),
}

impl TransactionView {
    pub fn kind(&self) -> TransactionKind {
        match self {
            Self::Income(_) => TransactionKind::Income,
            Self::Expense(_) => TransactionKind::Expense,
        }
    }

    /// Category for expenses; incomes have none and use their cash/card type
    pub fn label(&self) -> &str {
        match self {
            Self::Income(income) => income.income_type.as_str(),
            Self::Expense(expense) => expense.category.name(),
        }
    }

    pub fn amount(&self) -> Money {
        match self {
            Self::Income(income) => income.amount,
            Self::Expense(expense) => expense.amount,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Income(income) => income.date,
            Self::Expense(expense) => expense.date,
        }
    }

    /// Short identifier of the underlying record
    pub fn short_id(&self) -> String {
        match self {
            Self::Income(income) => income.id.to_string(),
            Self::Expense(expense) => expense.id.to_string(),
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, IncomeType, NewExpense, NewIncome};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_income_view_uses_type_as_label() {
        let income = IncomeRecord::from_new(NewIncome::new(
            Money::from_cents(10000),
            IncomeType::Card,
            date(2024, 1, 15),
            true,
        ));
        let view = TransactionView::Income(income);

        assert_eq!(view.kind(), TransactionKind::Income);
        assert_eq!(view.label(), "card");
        assert_eq!(view.amount().cents(), 10000);
        assert!(view.is_income());
        assert!(view.short_id().starts_with("inc-"));
    }

    #[test]
    fn test_expense_view_uses_category_as_label() {
        let expense = ExpenseRecord::from_new(NewExpense::new(
            Money::from_cents(4000),
            "groceries",
            ExpenseCategory::Food,
            date(2024, 1, 16),
        ));
        let view = TransactionView::Expense(expense);

        assert_eq!(view.kind(), TransactionKind::Expense);
        assert_eq!(view.label(), "Food");
        assert_eq!(view.date(), date(2024, 1, 16));
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("Income".parse::<TransactionKind>().unwrap(), TransactionKind::Income);
        assert!("transfer".parse::<TransactionKind>().is_err());
    }
}
