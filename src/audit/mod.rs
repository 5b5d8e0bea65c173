//! Audit logging for fintrack
//!
//! Every create, update and delete that reaches the store is appended to a
//! JSONL audit log together with the record's before/after state.
//!
//! ```rust,ignore
//! use fintrack::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(EntityType::Income, id.to_string(), None, &record))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
