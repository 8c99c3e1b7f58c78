//! Audit logging for FinFree
//!
//! Every create, update and delete made through the services is appended to
//! `audit.log` with before/after snapshots of the entity.
//!
//! - `AuditEntry`: one logged operation
//! - `AuditLogger`: JSONL writer and reader for the log file

mod diff;
mod entry;
mod logger;

pub use diff::describe_changes;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
