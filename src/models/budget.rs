//! Category budgets
//!
//! A budget caps spending for one category. `spent` is whatever figure the
//! budget was saved with; utilization is computed from it on demand.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;

/// Validation errors for budget input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    MissingCategory,
    NonPositiveLimit,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCategory => write!(f, "Category is required"),
            Self::NonPositiveLimit => write!(f, "Limit must be greater than 0"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

/// A spending limit for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRecord {
    pub id: BudgetId,
    /// Usually an expense category name; not checked against expenses
    pub category: String,
    pub limit: Money,
    #[serde(default)]
    pub spent: Money,
}

impl BudgetRecord {
    pub fn new(category: impl Into<String>, limit: Money, spent: Money) -> Self {
        Self {
            id: BudgetId::new(),
            category: category.into(),
            limit,
            spent,
        }
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.category.trim().is_empty() {
            return Err(BudgetValidationError::MissingCategory);
        }
        if !self.limit.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit);
        }
        Ok(())
    }

    /// Utilization against a given spent figure
    pub fn status_with_spent(&self, spent: Money) -> BudgetStatus {
        BudgetStatus::compute(self.limit, spent)
    }

    /// Utilization against the stored spent figure
    pub fn status(&self) -> BudgetStatus {
        self.status_with_spent(self.spent)
    }
}

/// Utilization of a budget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetStatus {
    pub limit: Money,
    pub spent: Money,
    /// spent / limit × 100 (0 when the limit is 0)
    pub percentage: f64,
    /// Strictly over: spending equal to the limit is not over budget
    pub is_over_budget: bool,
    /// |limit − spent|: what is left, or how far over
    pub difference: Money,
}

impl BudgetStatus {
    pub fn compute(limit: Money, spent: Money) -> Self {
        Self {
            limit,
            spent,
            percentage: spent.percent_of(limit),
            is_over_budget: spent > limit,
            difference: (limit - spent).abs(),
        }
    }

    /// Progress bar fill, capped at 100%
    pub fn fill_percentage(&self) -> f64 {
        self.percentage.min(100.0)
    }

    pub fn label(&self) -> &'static str {
        if self.is_over_budget {
            "Over"
        } else {
            "Used"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_budget_scenario() {
        let budget = BudgetRecord::new("Food", Money::from_cents(3000), Money::from_cents(4000));
        let status = budget.status();

        assert!(status.is_over_budget);
        assert_eq!(format!("{:.1}", status.percentage), "133.3");
        assert_eq!(status.difference.to_decimal_string(), "10.00");
        assert_eq!(status.fill_percentage(), 100.0);
        assert_eq!(status.label(), "Over");
    }

    #[test]
    fn test_exactly_at_limit_is_not_over() {
        let status = BudgetStatus::compute(Money::from_cents(5000), Money::from_cents(5000));
        assert!(!status.is_over_budget);
        assert_eq!(status.percentage, 100.0);
        assert!(status.difference.is_zero());
    }

    #[test]
    fn test_nothing_spent() {
        let status = BudgetStatus::compute(Money::from_cents(5000), Money::zero());
        assert!(!status.is_over_budget);
        assert_eq!(status.percentage, 0.0);
        assert_eq!(status.difference.cents(), 5000);
        assert_eq!(status.label(), "Used");
    }

    #[test]
    fn test_zero_limit_guard() {
        let status = BudgetStatus::compute(Money::zero(), Money::from_cents(100));
        assert_eq!(status.percentage, 0.0);
        assert!(status.is_over_budget);
    }

    #[test]
    fn test_validation() {
        let blank = BudgetRecord::new(" ", Money::from_cents(100), Money::zero());
        assert_eq!(blank.validate(), Err(BudgetValidationError::MissingCategory));

        let zero = BudgetRecord::new("Food", Money::zero(), Money::zero());
        assert_eq!(zero.validate(), Err(BudgetValidationError::NonPositiveLimit));

        let ok = BudgetRecord::new("Food", Money::from_cents(1), Money::zero());
        assert!(ok.validate().is_ok());
    }
}
