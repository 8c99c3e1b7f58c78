//! Settings service
//!
//! Persists settings changes and records them in the audit log.

use tracing::info;

use crate::audit::EntityType;
use crate::config::settings::Settings;
use crate::error::FinFreeResult;
use crate::models::Money;
use crate::storage::Storage;

pub struct SettingsService<'a> {
    storage: &'a Storage,
}

impl<'a> SettingsService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Change the petty-cash daily limit; it must be positive
    pub fn set_daily_limit(&self, settings: &mut Settings, limit: Money) -> FinFreeResult<()> {
        let mut next = settings.clone();
        next.set_daily_limit(limit)?;
        next.save(self.storage.paths())?;
        let before = std::mem::replace(settings, next);

        self.storage.log_update(
            EntityType::Settings,
            "settings",
            Some("Daily limit".to_string()),
            &before,
            settings,
            None,
        )?;

        info!(%limit, "daily limit updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinFreePaths;
    use crate::storage::MemoryStore;
    use tempfile::TempDir;

    #[test]
    fn test_set_daily_limit_saves_and_audits() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinFreePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::with_store(paths.clone(), Box::new(MemoryStore::new()));
        let mut settings = Settings::default();

        SettingsService::new(&storage)
            .set_daily_limit(&mut settings, Money::from_units(35))
            .unwrap();

        let reloaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(reloaded.daily_limit, Money::from_units(35));
        assert_eq!(storage.audit().entry_count().unwrap(), 1);
    }

    #[test]
    fn test_rejects_non_positive_limit() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinFreePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::with_store(paths, Box::new(MemoryStore::new()));
        let mut settings = Settings::default();

        let err = SettingsService::new(&storage)
            .set_daily_limit(&mut settings, Money::zero())
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(settings.daily_limit, Money::from_cents(2000));
    }
}
