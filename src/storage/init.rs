//! Storage initialization
//!
//! First-run setup: default settings and an empty ledger document.

use crate::config::paths::FinFreePaths;
use crate::config::settings::Settings;
use crate::error::FinFreeError;
use crate::state::Ledger;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation. Existing files are left
/// untouched. Returns `true` when anything was created.
pub fn initialize_storage(paths: &FinFreePaths) -> Result<bool, FinFreeError> {
    paths.ensure_directories()?;
    let mut created = false;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
        created = true;
    }

    if !paths.ledger_file().exists() {
        write_json_atomic(paths.ledger_file(), &Ledger::new())?;
        created = true;
    }

    if created {
        tracing::info!(base_dir = %paths.base_dir().display(), "Initialized storage");
    }

    Ok(created)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FinFreePaths) -> bool {
    !paths.settings_file().exists() || !paths.ledger_file().exists()
}
