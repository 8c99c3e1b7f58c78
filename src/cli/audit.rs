//! Audit log command

use crate::error::FinFreeResult;
use crate::storage::Storage;

/// Print the most recent audit entries, newest first
pub fn handle_audit_command(storage: &Storage, count: usize) -> FinFreeResult<()> {
    let mut entries = storage.audit().read_recent(count)?;
    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    entries.reverse();
    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
