//! Display formatting for terminal output
//!
//! Tables for records and history, budget progress bars and the profile card.

pub mod budget;
pub mod transaction;
pub mod user;

pub use budget::{format_bar, format_budget_list};
pub use transaction::{format_expense_list, format_history_table, format_income_list};
pub use user::format_user_details;
