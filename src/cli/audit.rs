//! Audit log CLI command

use crate::error::FintrackResult;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, count: usize, verbose: bool) -> FintrackResult<()> {
    let entries = storage.audit().read_recent(count)?;

    if entries.is_empty() {
        println!("Audit log is empty.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
        if verbose {
            if let Some(before) = &entry.before {
                println!("    before: {}", before);
            }
            if let Some(after) = &entry.after {
                println!("    after:  {}", after);
            }
        }
    }

    Ok(())
}
