//! Dashboard aggregates
//!
//! Totals, month-over-month income growth, a trailing monthly series and an
//! expense breakdown by category. Everything is recomputed from the current
//! records on every call.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::config::{MonthWindow, Settings};
use crate::error::FintrackResult;
use crate::models::{ExpenseRecord, IncomeRecord, Money};
use crate::storage::Storage;

/// A calendar month, January = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month `n` months before this one
    pub fn months_back(&self, n: u32) -> Self {
        let index = self.year * 12 + self.month as i32 - 1 - n as i32;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Short month name, e.g. `Jan`
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b").to_string())
            .unwrap_or_default()
    }

    /// Whether `date` falls in this month under the given window policy
    pub fn contains(&self, date: NaiveDate, window: MonthWindow) -> bool {
        match window {
            MonthWindow::Calendar => date.year() == self.year && date.month() == self.month,
            MonthWindow::MonthOfYear => date.month() == self.month,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub month: YearMonth,
    pub label: String,
    pub income: Money,
    pub expenses: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub category: String,
    pub amount: Money,
    /// Share of total expenses
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub as_of: NaiveDate,
    pub total_income: Money,
    pub total_expenses: Money,
    pub balance: Money,
    pub current_month_income: Money,
    pub last_month_income: Money,
    /// Percent change in income from last month; 0 when last month had none
    pub growth: f64,
    /// Oldest month first
    pub monthly: Vec<MonthlyPoint>,
    /// First-seen category order
    pub categories: Vec<CategorySlice>,
}

impl DashboardReport {
    pub fn generate(storage: &Storage, settings: &Settings, today: NaiveDate) -> FintrackResult<Self> {
        let incomes = storage.finance.incomes()?;
        let expenses = storage.finance.expenses()?;
        Ok(Self::compute(
            &incomes,
            &expenses,
            today,
            settings.trailing_months,
            settings.month_window,
        ))
    }

    pub fn compute(
        incomes: &[IncomeRecord],
        expenses: &[ExpenseRecord],
        today: NaiveDate,
        trailing_months: u32,
        window: MonthWindow,
    ) -> Self {
        let total_income: Money = incomes.iter().map(|i| i.amount).sum();
        let total_expenses: Money = expenses.iter().map(|e| e.amount).sum();

        let current = YearMonth::of(today);
        let current_month_income = income_in(incomes, current, window);
        let last_month_income = match window {
            // month-number parity: January has no previous month
            MonthWindow::MonthOfYear if current.month == 1 => Money::zero(),
            _ => income_in(incomes, current.months_back(1), window),
        };
        let growth = (current_month_income - last_month_income).percent_of(last_month_income);

        let monthly = (0..trailing_months)
            .rev()
            .map(|back| {
                let month = current.months_back(back);
                MonthlyPoint {
                    month,
                    label: month.label(),
                    income: income_in(incomes, month, window),
                    expenses: expenses
                        .iter()
                        .filter(|e| month.contains(e.date, window))
                        .map(|e| e.amount)
                        .sum(),
                }
            })
            .collect();

        Self {
            as_of: today,
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            current_month_income,
            last_month_income,
            growth,
            monthly,
            categories: category_breakdown(expenses, total_expenses),
        }
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Dashboard as of {}\n", self.as_of));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("{:<20} {:>14}\n", "Total Income:", self.total_income));
        output.push_str(&format!("{:<20} {:>14}\n", "Total Expenses:", self.total_expenses));
        output.push_str(&format!("{:<20} {:>14}\n", "Balance:", self.balance));
        output.push_str(&format!("{:<20} {:>13.1}%\n", "Income Growth:", self.growth));

        output.push_str("\nMonthly Overview\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!("{:<10} {:>14} {:>14}\n", "Month", "Income", "Expenses"));
        for point in &self.monthly {
            output.push_str(&format!(
                "{:<10} {:>14} {:>14}\n",
                format!("{} {}", point.label, point.month.year),
                point.income,
                point.expenses
            ));
        }

        if !self.categories.is_empty() {
            output.push_str("\nExpenses by Category\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for slice in &self.categories {
                output.push_str(&format!(
                    "{:<20} {:>14} {:>7.1}%\n",
                    slice.category, slice.amount, slice.percentage
                ));
            }
        }

        output
    }
}

fn income_in(incomes: &[IncomeRecord], month: YearMonth, window: MonthWindow) -> Money {
    incomes
        .iter()
        .filter(|i| month.contains(i.date, window))
        .map(|i| i.amount)
        .sum()
}

fn category_breakdown(expenses: &[ExpenseRecord], total: Money) -> Vec<CategorySlice> {
    let mut slices: Vec<CategorySlice> = Vec::new();

    for expense in expenses {
        let name = expense.category.name();
        match slices.iter_mut().find(|s| s.category == name) {
            Some(slice) => slice.amount += expense.amount,
            None => slices.push(CategorySlice {
                category: name.to_string(),
                amount: expense.amount,
                percentage: 0.0,
            }),
        }
    }

    for slice in &mut slices {
        slice.percentage = slice.amount.percent_of(total);
    }
    slices
}
