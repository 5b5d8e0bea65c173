//! Tax estimation
//!
//! Three mutually exclusive modes: a selection of taxable incomes, a single
//! manually entered figure, or a gross/net pay comparison. Nothing here
//! writes back to the store.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{IncomeId, IncomeRecord, Money};
use crate::storage::Storage;

/// Rate and deductions shared by the selection and manual modes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxInputs {
    /// Percent, 0..=100
    pub rate: f64,
    pub deductions: Money,
}

impl TaxInputs {
    pub fn new(rate: f64, deductions: Money) -> Self {
        Self { rate, deductions }
    }

    pub fn validate(&self) -> FintrackResult<()> {
        if !self.rate.is_finite() || !(0.0..=100.0).contains(&self.rate) {
            return Err(FintrackError::Validation(
                "Tax rate must be between 0 and 100".into(),
            ));
        }
        if self.deductions.is_negative() {
            return Err(FintrackError::Validation(
                "Deductions cannot be negative".into(),
            ));
        }
        Ok(())
    }
}

impl Default for TaxInputs {
    fn default() -> Self {
        Self::new(20.0, Money::zero())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxMode {
    /// Sum of the selected taxable incomes
    Selection { ids: BTreeSet<IncomeId> },
    Manual { taxable_income: Money },
    GrossNet { gross: Money, net: Money },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum TaxResult {
    Payable {
        taxable_income: Money,
        deductions: Money,
        rate: f64,
        tax_payable: Money,
    },
    GrossNet {
        gross: Money,
        net: Money,
        taxes_deducted: Money,
        tax_percentage: f64,
    },
}

impl TaxResult {
    pub fn format_terminal(&self) -> String {
        match self {
            Self::Payable {
                taxable_income,
                deductions,
                rate,
                tax_payable,
            } => format!(
                "Taxable income: {}\nDeductions:     {}\nTax rate:       {:.2}%\nTax payable:    {}\n",
                taxable_income, deductions, rate, tax_payable
            ),
            Self::GrossNet {
                gross,
                net,
                taxes_deducted,
                tax_percentage,
            } => format!(
                "Gross pay:      {}\nNet pay:        {}\nTaxes deducted: {}\nTax percentage: {:.2}%\n",
                gross, net, taxes_deducted, tax_percentage
            ),
        }
    }
}

/// `max(0, taxable − deductions) × rate / 100`
pub fn tax_payable(taxable_income: Money, inputs: &TaxInputs) -> Money {
    (taxable_income - inputs.deductions)
        .clamp_non_negative()
        .apply_rate(inputs.rate)
}

/// Compute a result for one mode against the given incomes
pub fn estimate(
    mode: &TaxMode,
    inputs: &TaxInputs,
    incomes: &[IncomeRecord],
) -> FintrackResult<TaxResult> {
    match mode {
        TaxMode::Selection { ids } => {
            inputs.validate()?;
            let taxable_income = incomes
                .iter()
                .filter(|income| income.taxable && ids.contains(&income.id))
                .map(|income| income.amount)
                .sum();
            Ok(payable(taxable_income, inputs))
        }
        TaxMode::Manual { taxable_income } => {
            inputs.validate()?;
            if taxable_income.is_negative() {
                return Err(FintrackError::Validation(
                    "Taxable income cannot be negative".into(),
                ));
            }
            Ok(payable(*taxable_income, inputs))
        }
        TaxMode::GrossNet { gross, net } => gross_net(*gross, *net),
    }
}

fn payable(taxable_income: Money, inputs: &TaxInputs) -> TaxResult {
    let tax_payable = tax_payable(taxable_income, inputs);
    debug!(taxable = %taxable_income, payable = %tax_payable, "tax estimated");
    TaxResult::Payable {
        taxable_income,
        deductions: inputs.deductions,
        rate: inputs.rate,
        tax_payable,
    }
}

fn gross_net(gross: Money, net: Money) -> FintrackResult<TaxResult> {
    if !gross.is_positive() {
        return Err(FintrackError::Validation(
            "Gross pay must be greater than 0".into(),
        ));
    }
    if net.is_negative() || net > gross {
        return Err(FintrackError::Validation(
            "Net pay must be between 0 and gross pay".into(),
        ));
    }

    let taxes_deducted = gross - net;
    Ok(TaxResult::GrossNet {
        gross,
        net,
        taxes_deducted,
        tax_percentage: taxes_deducted.percent_of(gross),
    })
}

/// Interactive calculator state: selected incomes and the last result
#[derive(Debug, Default)]
pub struct TaxSession {
    selected: BTreeSet<IncomeId>,
    result: Option<TaxResult>,
}

impl TaxSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip an income in or out of the selection; returns whether it is now selected
    pub fn toggle(&mut self, id: IncomeId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    pub fn selected(&self) -> &BTreeSet<IncomeId> {
        &self.selected
    }

    pub fn calculate(
        &mut self,
        inputs: &TaxInputs,
        incomes: &[IncomeRecord],
    ) -> FintrackResult<&TaxResult> {
        let mode = TaxMode::Selection {
            ids: self.selected.clone(),
        };
        let result = estimate(&mode, inputs, incomes)?;
        Ok(self.result.insert(result))
    }

    pub fn result(&self) -> Option<&TaxResult> {
        self.result.as_ref()
    }

    /// Reset the selection and the result
    pub fn clear(&mut self) {
        self.selected.clear();
        self.result = None;
    }
}

pub struct TaxService<'a> {
    storage: &'a Storage,
}

impl<'a> TaxService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn estimate(&self, mode: &TaxMode, inputs: &TaxInputs) -> FintrackResult<TaxResult> {
        let incomes = self.storage.finance.incomes()?;
        estimate(mode, inputs, &incomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IncomeType, NewIncome};
    use chrono::NaiveDate;

    fn income(cents: i64, taxable: bool) -> IncomeRecord {
        IncomeRecord::from_new(NewIncome::new(
            Money::from_cents(cents),
            IncomeType::Card,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            taxable,
        ))
    }

    #[test]
    fn test_selection_mode() {
        let selected = income(100_000, true);
        let other = income(50_000, true);
        let incomes = vec![selected.clone(), other];

        let mode = TaxMode::Selection {
            ids: BTreeSet::from([selected.id]),
        };
        let inputs = TaxInputs::new(20.0, Money::from_cents(20_000));

        match estimate(&mode, &inputs, &incomes).unwrap() {
            TaxResult::Payable {
                taxable_income,
                tax_payable,
                ..
            } => {
                assert_eq!(taxable_income.cents(), 100_000);
                assert_eq!(tax_payable.to_decimal_string(), "160.00");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_selection_ignores_non_taxable() {
        let untaxed = income(100_000, false);
        let mode = TaxMode::Selection {
            ids: BTreeSet::from([untaxed.id]),
        };

        let result = estimate(&mode, &TaxInputs::default(), &[untaxed]).unwrap();
        assert!(matches!(
            result,
            TaxResult::Payable { taxable_income, .. } if taxable_income.is_zero()
        ));
    }

    #[test]
    fn test_deductions_larger_than_income_pay_nothing() {
        let payable = tax_payable(
            Money::from_cents(10_000),
            &TaxInputs::new(30.0, Money::from_cents(50_000)),
        );
        assert_eq!(payable, Money::zero());
    }

    #[test]
    fn test_manual_mode() {
        let mode = TaxMode::Manual {
            taxable_income: Money::from_cents(250_000),
        };
        let result = estimate(&mode, &TaxInputs::new(10.0, Money::zero()), &[]).unwrap();
        assert!(matches!(
            result,
            TaxResult::Payable { tax_payable, .. } if tax_payable.cents() == 25_000
        ));
    }

    #[test]
    fn test_rate_out_of_range() {
        let mode = TaxMode::Manual {
            taxable_income: Money::from_cents(100),
        };
        let err = estimate(&mode, &TaxInputs::new(120.0, Money::zero()), &[]).unwrap_err();
        assert!(err.is_validation());
        let err = estimate(&mode, &TaxInputs::new(-1.0, Money::zero()), &[]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_gross_net_mode() {
        let mode = TaxMode::GrossNet {
            gross: Money::from_cents(100_000),
            net: Money::from_cents(80_000),
        };
        // rate and deductions play no part here
        let inputs = TaxInputs::new(500.0, Money::from_cents(-1));

        match estimate(&mode, &inputs, &[]).unwrap() {
            TaxResult::GrossNet {
                taxes_deducted,
                tax_percentage,
                ..
            } => {
                assert_eq!(taxes_deducted.to_decimal_string(), "200.00");
                assert_eq!(format!("{:.2}", tax_percentage), "20.00");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_gross_net_requires_positive_gross() {
        let mode = TaxMode::GrossNet {
            gross: Money::zero(),
            net: Money::zero(),
        };
        assert!(estimate(&mode, &TaxInputs::default(), &[])
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_session_toggle_calculate_clear() {
        let a = income(100_000, true);
        let b = income(40_000, true);
        let incomes = vec![a.clone(), b.clone()];
        let mut session = TaxSession::new();

        assert!(session.toggle(a.id));
        assert!(session.toggle(b.id));
        assert!(!session.toggle(b.id));

        let result = session
            .calculate(&TaxInputs::new(20.0, Money::zero()), &incomes)
            .unwrap()
            .clone();
        assert!(matches!(
            result,
            TaxResult::Payable { tax_payable, .. } if tax_payable.cents() == 20_000
        ));
        assert!(session.result().is_some());

        session.clear();
        assert!(session.selected().is_empty());
        assert!(session.result().is_none());
    }
}
