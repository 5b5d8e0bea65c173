//! Income CLI commands

use clap::Subcommand;

use crate::display::format_income_list;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{IncomeType, IncomeValidationError, Money, NewIncome};
use crate::services::IncomeService;
use crate::storage::Storage;

use super::{parse_amount, parse_date_or_today};

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record income
    Add {
        /// Amount (e.g., "100" or "100.00")
        amount: String,

        /// How it was received: cash or card
        #[arg(short = 't', long = "type", default_value = "cash")]
        income_type: String,

        /// Date received (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Include in tax calculations
        #[arg(long)]
        taxable: bool,
    },

    /// List recorded income
    List {
        /// Only taxable income
        #[arg(long)]
        taxable: bool,
    },

    /// Delete an income record
    Delete {
        /// Income ID (short id or UUID prefix)
        id: String,
    },

    /// Delete all income records
    Clear,
}

/// Handle an income command
pub fn handle_income_command(storage: &Storage, cmd: IncomeCommands) -> FintrackResult<()> {
    let service = IncomeService::new(storage);

    match cmd {
        IncomeCommands::Add {
            amount,
            income_type,
            date,
            taxable,
        } => {
            let amount = parse_amount(&amount)?;
            let income_type: IncomeType = income_type
                .parse()
                .map_err(|e: IncomeValidationError| FintrackError::Validation(e.to_string()))?;
            let date = parse_date_or_today(date.as_deref())?;

            let record = service.add(NewIncome::new(amount, income_type, date, taxable))?;
            println!(
                "Added income {}: {} ({}) on {}{}",
                record.id,
                record.amount,
                record.income_type,
                record.date,
                if record.taxable { " [taxable]" } else { "" }
            );
        }

        IncomeCommands::List { taxable } => {
            let incomes = if taxable {
                service.taxable()?
            } else {
                service.list()?
            };
            print!("{}", format_income_list(&incomes));
            if !incomes.is_empty() {
                let total: Money = incomes.iter().map(|i| i.amount).sum();
                println!("Total: {}", total);
            }
        }

        IncomeCommands::Delete { id } => match service.resolve(&id)? {
            Some(income_id) => {
                service.delete(income_id)?;
                println!("Deleted income {}", income_id);
            }
            None => println!("No income matches '{}'; nothing deleted.", id),
        },

        IncomeCommands::Clear => {
            let removed = service.clear()?;
            println!("Cleared {} income record(s).", removed);
        }
    }

    Ok(())
}
