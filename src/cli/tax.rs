//! Tax estimation CLI commands

use clap::{Args, Subcommand};

use crate::config::settings::Settings;
use crate::display::format_income_list;
use crate::error::{FintrackError, FintrackResult};
use crate::models::Money;
use crate::services::{IncomeService, TaxInputs, TaxMode, TaxService, TaxSession};
use crate::storage::Storage;

use super::parse_amount;

/// Rate and deduction flags; unset values come from settings
#[derive(Args, Debug, Default)]
pub struct RateArgs {
    /// Tax rate in percent (0-100)
    #[arg(short, long)]
    pub rate: Option<f64>,

    /// Deductions subtracted before the rate applies
    #[arg(short, long)]
    pub deductions: Option<String>,
}

impl RateArgs {
    fn inputs(&self, settings: &Settings) -> FintrackResult<TaxInputs> {
        let deductions = match self.deductions.as_deref() {
            Some(amount) => parse_amount(amount)?,
            None => Money::from_cents(settings.default_deductions_cents),
        };
        Ok(TaxInputs::new(
            self.rate.unwrap_or(settings.default_tax_rate),
            deductions,
        ))
    }
}

/// Tax subcommands
#[derive(Subcommand)]
pub enum TaxCommands {
    /// List income records eligible for selection
    Taxable,

    /// Estimate tax on selected taxable income records
    Selection {
        /// Income IDs to include
        #[arg(required_unless_present = "all")]
        ids: Vec<String>,

        /// Include every taxable income record
        #[arg(long, conflicts_with = "ids")]
        all: bool,

        #[command(flatten)]
        rates: RateArgs,
    },

    /// Estimate tax on an entered taxable income figure
    Manual {
        /// Taxable income
        income: String,

        #[command(flatten)]
        rates: RateArgs,
    },

    /// Compare gross and net pay to find the share withheld
    GrossNet {
        /// Gross pay
        gross: String,
        /// Net pay
        net: String,
    },
}

pub fn handle_tax_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TaxCommands,
) -> FintrackResult<()> {
    let income_service = IncomeService::new(storage);

    match cmd {
        TaxCommands::Taxable => {
            print!("{}", format_income_list(&income_service.taxable()?));
        }

        TaxCommands::Selection { ids, all, rates } => {
            let taxable = income_service.taxable()?;
            let mut session = TaxSession::new();

            if all {
                for income in &taxable {
                    session.toggle(income.id);
                }
            } else {
                for reference in &ids {
                    let id = income_service
                        .resolve(reference)?
                        .ok_or_else(|| FintrackError::income_not_found(reference.clone()))?;
                    if !taxable.iter().any(|income| income.id == id) {
                        return Err(FintrackError::Validation(format!(
                            "Income {} is not marked taxable",
                            id
                        )));
                    }
                    if !session.selected().contains(&id) {
                        session.toggle(id);
                    }
                }
            }

            println!("Selected {} income record(s)", session.selected().len());
            let result = session.calculate(&rates.inputs(settings)?, &taxable)?;
            print!("{}", result.format_terminal());
        }

        TaxCommands::Manual { income, rates } => {
            let mode = TaxMode::Manual {
                taxable_income: parse_amount(&income)?,
            };
            let result = TaxService::new(storage).estimate(&mode, &rates.inputs(settings)?)?;
            print!("{}", result.format_terminal());
        }

        TaxCommands::GrossNet { gross, net } => {
            let mode = TaxMode::GrossNet {
                gross: parse_amount(&gross)?,
                net: parse_amount(&net)?,
            };
            let result = TaxService::new(storage).estimate(&mode, &TaxInputs::default())?;
            print!("{}", result.format_terminal());
        }
    }

    Ok(())
}
