//! Budget progress display

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::services::BudgetLine;

const BAR_WIDTH: usize = 20;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Bar of `width` cells filled to `percent`, capped at full
pub fn format_bar(percent: f64, width: usize) -> String {
    let filled = if percent.is_finite() && percent > 0.0 {
        ((percent.min(100.0) / 100.0) * width as f64).round() as usize
    } else {
        0
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn format_budget_list(lines: &[BudgetLine]) -> String {
    if lines.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let rows: Vec<_> = lines
        .iter()
        .map(|line| {
            let status = &line.status;
            BudgetRow {
                id: line.budget.id.to_string(),
                category: line.budget.category.clone(),
                spent: status.spent.to_string(),
                limit: status.limit.to_string(),
                progress: format!(
                    "{} {:.1}%",
                    format_bar(status.fill_percentage(), BAR_WIDTH),
                    status.percentage
                ),
                status: if status.is_over_budget {
                    format!("{} by {}", status.label(), status.difference)
                } else {
                    format!("{} left", status.difference)
                },
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    format!("{}\n", table)
}
