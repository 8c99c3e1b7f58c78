//! Storage layer for FinFree
//!
//! The ledger goes through a [`LedgerStore`]; the audit log is appended
//! alongside every mutation.

pub mod file_io;
pub mod init;
pub mod store;

pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use store::{JsonFileStore, LedgerStore, MemoryStore};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FinFreePaths;
use crate::error::FinFreeResult;
use crate::state::Ledger;

/// Main storage coordinator: the ledger store plus the audit log
pub struct Storage {
    paths: FinFreePaths,
    store: Box<dyn LedgerStore>,
    audit: AuditLogger,
}

impl Storage {
    /// Open file-backed storage rooted at `paths`
    pub fn new(paths: FinFreePaths) -> FinFreeResult<Self> {
        paths.ensure_directories()?;
        let store = JsonFileStore::new(paths.ledger_file());
        Ok(Self::with_store(paths, Box::new(store)))
    }

    /// Use a custom ledger store; the audit log still lives under `paths`
    pub fn with_store(paths: FinFreePaths, store: Box<dyn LedgerStore>) -> Self {
        Self {
            audit: AuditLogger::new(paths.audit_log()),
            store,
            paths,
        }
    }

    pub fn paths(&self) -> &FinFreePaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_ledger(&self) -> FinFreeResult<Ledger> {
        self.store.load()
    }

    pub fn save_ledger(&self, ledger: &Ledger) -> FinFreeResult<()> {
        self.store.save(ledger)
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> FinFreeResult<()> {
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
    ) -> FinFreeResult<()> {
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
    ) -> FinFreeResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
