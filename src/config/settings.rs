//! User settings for FinFree
//!
//! Holds display preferences and the petty-cash daily limit.

use serde::{Deserialize, Serialize};

use super::paths::FinFreePaths;
use crate::error::FinFreeError;
use crate::models::Money;

/// User settings for FinFree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Petty-cash spending allowed per day
    #[serde(default = "default_daily_limit")]
    pub daily_limit: Money,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_daily_limit() -> Money {
    Money::from_cents(2000)
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            daily_limit: default_daily_limit(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinFreePaths) -> Result<Self, FinFreeError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FinFreeError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| FinFreeError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinFreePaths) -> Result<(), FinFreeError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinFreeError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinFreeError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Change the petty-cash daily limit. The limit must be positive.
    pub fn set_daily_limit(&mut self, limit: Money) -> Result<(), FinFreeError> {
        if !limit.is_positive() || limit.exceeds_max() {
            return Err(FinFreeError::Validation(
                "Please enter a valid daily limit".into(),
            ));
        }
        self.daily_limit = limit;
        Ok(())
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}
