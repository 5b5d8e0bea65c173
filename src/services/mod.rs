//! Service layer for fintrack
//!
//! Services sit between the CLI and the storage layer. They validate input
//! (the store never does), apply the mutation, persist, write the audit log
//! and notify store observers.

pub mod auth;
pub mod budget;
pub mod expense;
pub mod income;
pub mod tax;

pub use auth::AuthService;
pub use budget::{BudgetLine, BudgetService};
pub use expense::ExpenseService;
pub use income::IncomeService;
pub use tax::{TaxInputs, TaxMode, TaxResult, TaxService, TaxSession};

use crate::error::{FintrackError, FintrackResult};

/// Find the single id matching a user-typed reference
///
/// More than one match is a validation error; no match is `None`.
pub(crate) fn resolve_reference<I, F>(
    entity_type: &str,
    ids: Vec<I>,
    reference: &str,
    matches: F,
) -> FintrackResult<Option<I>>
where
    I: Copy + std::fmt::Display,
    F: Fn(&I, &str) -> bool,
{
    let found: Vec<I> = ids.into_iter().filter(|id| matches(id, reference)).collect();
    match found.as_slice() {
        [] => Ok(None),
        [id] => Ok(Some(*id)),
        many => Err(FintrackError::Validation(format!(
            "{} reference '{}' is ambiguous ({} matches)",
            entity_type,
            reference,
            many.len()
        ))),
    }
}
