//! Storage layer for fintrack
//!
//! `Storage` owns the finance repository, the session repository and the
//! audit log. It is opened once at startup, handed by reference to the
//! services, and closed explicitly at shutdown. Observers registered with
//! [`Storage::subscribe`] are called after each persisted mutation.

pub mod events;
pub mod file_io;
pub mod finance;
pub mod session;

pub use events::{StoreEvent, Subscriber};
pub use file_io::{read_json, write_json_atomic};
pub use finance::{FinanceData, FinanceRepository};
pub use session::SessionRepository;

use std::sync::RwLock;

use serde::Serialize;
use tracing::{debug, warn};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FintrackPaths;
use crate::error::{FintrackError, FintrackResult};

/// Main storage coordinator
pub struct Storage {
    paths: FintrackPaths,
    pub finance: FinanceRepository,
    pub session: SessionRepository,
    audit: AuditLogger,
    subscribers: RwLock<Vec<Subscriber>>,
}

impl Storage {
    /// Create storage without loading anything from disk
    pub fn new(paths: FintrackPaths) -> Result<Self, FintrackError> {
        paths.ensure_directories()?;

        Ok(Self {
            finance: FinanceRepository::new(paths.finance_file()),
            session: SessionRepository::new(paths.session_file()),
            audit: AuditLogger::new(paths.audit_log()),
            subscribers: RwLock::new(Vec::new()),
            paths,
        })
    }

    /// Create storage and load the persisted snapshot
    pub fn open(paths: FintrackPaths) -> Result<Self, FintrackError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        debug!(base = %storage.paths.base_dir().display(), "storage opened");
        Ok(storage)
    }

    pub fn paths(&self) -> &FintrackPaths {
        &self.paths
    }

    pub fn load_all(&self) -> Result<(), FintrackError> {
        self.finance.load()?;
        self.session.load()?;
        Ok(())
    }

    pub fn save_all(&self) -> Result<(), FintrackError> {
        self.finance.save()?;
        self.session.save()?;
        Ok(())
    }

    /// Flush everything and drop observers
    pub fn close(self) -> Result<(), FintrackError> {
        self.save_all()?;
        debug!("storage closed");
        Ok(())
    }

    /// Register an observer for store mutations
    pub fn subscribe<F>(&self, subscriber: F) -> FintrackResult<()>
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        self.subscribers
            .write()
            .map_err(|e| FintrackError::Storage(format!("Failed to acquire write lock: {}", e)))?
            .push(Box::new(subscriber));
        Ok(())
    }

    /// Deliver an event to every observer
    pub fn notify(&self, event: StoreEvent) {
        match self.subscribers.read() {
            Ok(subscribers) => {
                for subscriber in subscribers.iter() {
                    subscriber(&event);
                }
            }
            Err(_) => warn!(?event, "subscriber list poisoned; event dropped"),
        }
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> FintrackResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> FintrackResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> FintrackResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_batch(&self, entries: &[AuditEntry]) -> FintrackResult<()> {
        self.audit.log_batch(entries)
    }
}
