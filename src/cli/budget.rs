//! Budget CLI commands
//!
//! Category budgets: set a limit, list utilization, delete.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_budget_list;
use crate::error::FintrackResult;
use crate::services::BudgetService;
use crate::storage::Storage;

use super::parse_amount;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the spending limit for a category
    Set {
        /// Category name (usually an expense category)
        category: String,
        /// Limit (e.g., "300" or "300.00")
        limit: String,
    },

    /// Show every budget with its utilization
    List,

    /// Delete a budget
    Delete {
        /// Budget ID or category name
        budget: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FintrackResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Set { category, limit } => {
            let limit = parse_amount(&limit)?;
            let budget = service.set_budget(&category, limit)?;
            let status = budget.status();

            println!(
                "Budget for {} set to {} ({} spent, {:.1}%)",
                budget.category, budget.limit, budget.spent, status.percentage
            );
            if status.is_over_budget {
                println!("Over budget by {}", status.difference);
            }
        }

        BudgetCommands::List => {
            let lines = service.list_with_status(settings.budget_spent)?;
            print!("{}", format_budget_list(&lines));
        }

        BudgetCommands::Delete { budget } => match service.resolve(&budget)? {
            Some(id) => {
                service.delete_budget(id)?;
                println!("Deleted budget {}", id);
            }
            None => println!("No budget matches '{}'; nothing deleted.", budget),
        },
    }

    Ok(())
}
