//! The ledger persistence port and its implementations

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{FinFreeError, FinFreeResult};
use crate::state::Ledger;

use super::file_io::{read_json, write_json_atomic};

/// Reads and writes the whole ledger
pub trait LedgerStore: Send + Sync {
    fn load(&self) -> FinFreeResult<Ledger>;
    fn save(&self, ledger: &Ledger) -> FinFreeResult<()>;
}

/// Stores the ledger as a single pretty-printed JSON document
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> FinFreeResult<Ledger> {
        let ledger: Ledger = read_json(&self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            expenses = ledger.expenses.len(),
            income = ledger.income.len(),
            goals = ledger.goals.len(),
            unreadable = ledger.unreadable.len(),
            "Loaded ledger"
        );
        Ok(ledger)
    }

    fn save(&self, ledger: &Ledger) -> FinFreeResult<()> {
        write_json_atomic(&self.path, ledger)
    }
}

/// Keeps the ledger in memory
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Ledger>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing ledger
    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            data: RwLock::new(ledger),
        }
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> FinFreeResult<Ledger> {
        let data = self
            .data
            .read()
            .map_err(|e| FinFreeError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.clone())
    }

    fn save(&self, ledger: &Ledger) -> FinFreeResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinFreeError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = ledger.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, ExpenseCategory, Money};
    use chrono::{NaiveDate, Utc};
    use tempfile::TempDir;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.expenses.push(Expense::new(
            Money::from_units(42),
            ExpenseCategory::Bills,
            "Phone",
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            Utc::now(),
        ));
        ledger
    }

    #[test]
    fn test_json_store_missing_file_is_empty_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("data").join("ledger.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_json_store_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        let ledger = sample_ledger();

        JsonFileStore::new(path.clone()).save(&ledger).unwrap();
        let reloaded = JsonFileStore::new(path).load().unwrap();

        assert_eq!(reloaded, ledger);
    }

    #[test]
    fn test_json_store_skips_bad_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        std::fs::write(
            &path,
            r#"{"expenses": [{"id": "not-a-uuid", "amount": 100}], "income": []}"#,
        )
        .unwrap();

        let ledger = JsonFileStore::new(path).load().unwrap();
        assert!(ledger.expenses.is_empty());
    }

    #[test]
    fn test_json_store_save_keeps_undecodable_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        let legacy = serde_json::json!({
            "id": "00000000-0000-4000-8000-000000000001",
            "amount": 1500,
            "category": "groceries",
            "description": "legacy",
            "date": "2024-12-01",
            "timestamp": "2024-12-01T10:00:00Z"
        });
        std::fs::write(
            &path,
            serde_json::to_string(&serde_json::json!({ "expenses": [legacy.clone()] })).unwrap(),
        )
        .unwrap();

        let store = JsonFileStore::new(path.clone());
        let mut ledger = store.load().unwrap();
        assert!(ledger.expenses.is_empty());

        ledger.expenses.extend(sample_ledger().expenses);
        store.save(&ledger).unwrap();

        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let expenses = on_disk["expenses"].as_array().unwrap();
        assert_eq!(expenses.len(), 2);
        assert!(expenses.contains(&legacy));

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.expenses.len(), 1);
        assert_eq!(reloaded.unreadable.expenses, vec![legacy]);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_empty());

        let ledger = sample_ledger();
        store.save(&ledger).unwrap();
        assert_eq!(store.load().unwrap(), ledger);
    }
}
