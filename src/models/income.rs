//! Income records
//!
//! An income entry is an amount received on a date, paid either in cash or
//! by card, optionally flagged as taxable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::IncomeId;
use super::money::Money;

/// How the income was received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IncomeType {
    #[default]
    Cash,
    Card,
}

impl IncomeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
        }
    }
}

impl fmt::Display for IncomeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncomeType {
    type Err = IncomeValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            other => Err(IncomeValidationError::UnknownType(other.to_string())),
        }
    }
}

/// Validation errors for income input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    NonPositiveAmount,
    UnknownType(String),
}

impl fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Amount must be greater than 0"),
            Self::UnknownType(t) => write!(f, "Unknown income type '{}' (expected cash or card)", t),
        }
    }
}

impl std::error::Error for IncomeValidationError {}

/// Income input as submitted, before an identifier is assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIncome {
    pub amount: Money,
    #[serde(rename = "type")]
    pub income_type: IncomeType,
    pub date: NaiveDate,
    pub taxable: bool,
}

impl NewIncome {
    pub fn new(amount: Money, income_type: IncomeType, date: NaiveDate, taxable: bool) -> Self {
        Self {
            amount,
            income_type,
            date,
            taxable,
        }
    }

    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if !self.amount.is_positive() {
            return Err(IncomeValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

/// A persisted income record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub id: IncomeId,
    pub amount: Money,
    #[serde(rename = "type")]
    pub income_type: IncomeType,
    pub date: NaiveDate,
    #[serde(default)]
    pub taxable: bool,
}

impl IncomeRecord {
    /// Assign a fresh identifier to submitted input
    pub fn from_new(input: NewIncome) -> Self {
        Self {
            id: IncomeId::new(),
            amount: input.amount,
            income_type: input.income_type,
            date: input.date,
            taxable: input.taxable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_new_assigns_fresh_ids() {
        let input = NewIncome::new(Money::from_cents(10000), IncomeType::Cash, date(2024, 1, 15), true);
        let a = IncomeRecord::from_new(input.clone());
        let b = IncomeRecord::from_new(input);

        assert_ne!(a.id, b.id);
        assert_eq!(a.amount.cents(), 10000);
        assert!(a.taxable);
    }

    #[test]
    fn test_validation() {
        let zero = NewIncome::new(Money::zero(), IncomeType::Card, date(2024, 1, 1), false);
        assert_eq!(zero.validate(), Err(IncomeValidationError::NonPositiveAmount));

        let ok = NewIncome::new(Money::from_cents(1), IncomeType::Card, date(2024, 1, 1), false);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_income_type_parse() {
        assert_eq!("Cash".parse::<IncomeType>().unwrap(), IncomeType::Cash);
        assert_eq!(" card ".parse::<IncomeType>().unwrap(), IncomeType::Card);
        assert!("cheque".parse::<IncomeType>().is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let record = IncomeRecord::from_new(NewIncome::new(
            Money::from_cents(2550),
            IncomeType::Card,
            date(2024, 2, 29),
            false,
        ));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["type"], "card");
        assert_eq!(value["date"], "2024-02-29");
        assert_eq!(value["amount"], 2550);
    }
}
