//! Path management for FinFree
//!
//! Provides XDG-compliant path resolution for configuration, data, and the
//! audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `FINFREE_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/finfree` or `~/.config/finfree`
//! 3. Windows: `%APPDATA%\finfree`

use std::path::PathBuf;

use crate::error::FinFreeError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "FINFREE_DATA_DIR";

/// Manages all paths used by FinFree
#[derive(Debug, Clone)]
pub struct FinFreePaths {
    base_dir: PathBuf,
}

impl FinFreePaths {
    /// Create a new FinFreePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, FinFreeError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create FinFreePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to ledger.json (all records, budgets, goals and petty cash)
    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir().join("ledger.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), FinFreeError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FinFreeError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FinFreeError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if FinFree has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, FinFreeError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("finfree"));
    }

    let home = std::env::var("HOME")
        .map_err(|_| FinFreeError::Config("Could not determine HOME directory".into()))?;
    Ok(PathBuf::from(home).join(".config").join("finfree"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, FinFreeError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| FinFreeError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("finfree"))
}
