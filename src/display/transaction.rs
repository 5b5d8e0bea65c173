//! Record and history tables

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{ExpenseRecord, IncomeRecord, TransactionView};

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct IncomeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    income_type: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Taxable")]
    taxable: &'static str,
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    expense_type: String,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Signed amount as the history shows it: `+$100.00` / `-$40.00`
fn signed(view: &TransactionView) -> String {
    let sign = if view.is_income() { '+' } else { '-' };
    format!("{}{}", sign, view.amount())
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    format!("{}\n", table)
}

pub fn format_history_table(views: &[TransactionView]) -> String {
    if views.is_empty() {
        return "No transactions found.\n".to_string();
    }

    render(
        views
            .iter()
            .map(|view| HistoryRow {
                id: view.short_id(),
                date: view.date().to_string(),
                kind: view.kind().as_str(),
                category: view.label().to_string(),
                amount: signed(view),
            })
            .collect(),
    )
}

pub fn format_income_list(incomes: &[IncomeRecord]) -> String {
    if incomes.is_empty() {
        return "No income recorded.\n".to_string();
    }

    render(
        incomes
            .iter()
            .map(|income| IncomeRow {
                id: income.id.to_string(),
                date: income.date.to_string(),
                income_type: income.income_type.as_str(),
                amount: income.amount.to_string(),
                taxable: if income.taxable { "yes" } else { "no" },
            })
            .collect(),
    )
}

pub fn format_expense_list(expenses: &[ExpenseRecord]) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    render(
        expenses
            .iter()
            .map(|expense| ExpenseRow {
                id: expense.id.to_string(),
                date: expense.date.to_string(),
                expense_type: expense.expense_type.clone(),
                category: expense.category.name(),
                amount: expense.amount.to_string(),
            })
            .collect(),
    )
}
