//! Expense CLI commands

use clap::Subcommand;

use crate::display::format_expense_list;
use crate::error::FintrackResult;
use crate::models::{ExpenseCategory, Money, NewExpense};
use crate::services::expense::parse_category;
use crate::services::ExpenseService;
use crate::storage::Storage;

use super::{parse_amount, parse_date_or_today};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Amount (e.g., "40" or "40.00")
        amount: String,

        /// What it was for (free text)
        #[arg(short = 't', long = "type")]
        expense_type: String,

        /// Category (defaults to Other)
        #[arg(short, long)]
        category: Option<String>,

        /// Date spent (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List recorded expenses
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete an expense record
    Delete {
        /// Expense ID (short id or UUID prefix)
        id: String,
    },

    /// Delete all expense records
    Clear,

    /// Show the available categories
    Categories,
}

/// Handle an expense command
pub fn handle_expense_command(storage: &Storage, cmd: ExpenseCommands) -> FintrackResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            amount,
            expense_type,
            category,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let category = parse_category(category.as_deref())?;
            let date = parse_date_or_today(date.as_deref())?;

            let record = service.add(NewExpense::new(amount, expense_type, category, date))?;
            println!(
                "Added expense {}: {} for {} ({}) on {}",
                record.id, record.amount, record.expense_type, record.category, record.date
            );
        }

        ExpenseCommands::List { category } => {
            let mut expenses = service.list()?;
            if let Some(name) = category {
                let category = parse_category(Some(&name))?;
                expenses.retain(|e| e.category == category);
            }
            print!("{}", format_expense_list(&expenses));
            if !expenses.is_empty() {
                let total: Money = expenses.iter().map(|e| e.amount).sum();
                println!("Total: {}", total);
            }
        }

        ExpenseCommands::Delete { id } => match service.resolve(&id)? {
            Some(expense_id) => {
                service.delete(expense_id)?;
                println!("Deleted expense {}", expense_id);
            }
            None => println!("No expense matches '{}'; nothing deleted.", id),
        },

        ExpenseCommands::Clear => {
            let removed = service.clear()?;
            println!("Cleared {} expense record(s).", removed);
        }

        ExpenseCommands::Categories => {
            for category in ExpenseCategory::all() {
                println!("{}", category);
            }
        }
    }

    Ok(())
}
