//! Service layer for FinFree
//!
//! Services validate input, apply the change to a copy of the borrowed
//! [`Ledger`], persist the copy through [`Storage`] and append to the
//! audit log. The borrowed ledger only changes once the save succeeds.
//! Each service borrows the ledger mutably for its lifetime.

pub mod budget;
pub mod expense;
pub mod goal;
pub mod income;
pub mod petty_cash;
pub mod settings;

pub use budget::{BudgetService, BudgetSuggestion};
pub use expense::{ExpenseFilter, ExpenseService};
pub use goal::{CreateGoalInput, GoalService};
pub use income::{IncomeService, RecurrencePlan};
pub use petty_cash::{PettyCashOutcome, PettyCashService};
pub use settings::SettingsService;

use crate::error::{FinFreeError, FinFreeResult};
use crate::state::Ledger;
use crate::storage::Storage;

/// Apply `change` to a copy of `ledger`, save the copy and then adopt it.
///
/// If the save fails `ledger` is left exactly as it was.
pub(crate) fn commit<R>(
    storage: &Storage,
    ledger: &mut Ledger,
    change: impl FnOnce(&mut Ledger) -> R,
) -> FinFreeResult<R> {
    let mut next = ledger.clone();
    let result = change(&mut next);
    storage.save_ledger(&next)?;
    *ledger = next;
    Ok(result)
}

/// Find the position of the single record whose ID matches `reference`.
///
/// Short references that match more than one record are rejected.
pub(crate) fn resolve_reference<T>(
    records: &[T],
    reference: &str,
    matches: impl Fn(&T, &str) -> bool,
    not_found: impl FnOnce(String) -> FinFreeError,
) -> FinFreeResult<usize> {
    let mut hits = records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(r, reference))
        .map(|(i, _)| i);

    match (hits.next(), hits.next()) {
        (Some(index), None) => Ok(index),
        (Some(_), Some(_)) => Err(FinFreeError::Validation(format!(
            "ID '{}' matches more than one record; use a longer prefix",
            reference
        ))),
        (None, _) => Err(not_found(reference.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinFreePaths;
    use crate::models::{Expense, ExpenseCategory, Goal, GoalCategory, Money};
    use crate::storage::LedgerStore;
    use chrono::{DateTime, TimeZone, Utc};
    use tempfile::TempDir;

    /// A store whose disk is always full
    struct FailingStore;

    impl LedgerStore for FailingStore {
        fn load(&self) -> FinFreeResult<Ledger> {
            Ok(Ledger::new())
        }

        fn save(&self, _ledger: &Ledger) -> FinFreeResult<()> {
            Err(FinFreeError::Storage("No space left on device".into()))
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    fn seeded_ledger() -> Ledger {
        let today = now().date_naive();
        let mut ledger = Ledger::new();
        ledger.expenses.push(Expense::new(
            Money::from_units(12),
            ExpenseCategory::Food,
            "Lunch",
            today,
            now(),
        ));
        ledger.goals.push(Goal::new(
            "Emergency fund",
            Money::from_units(1000),
            Money::from_units(100),
            today,
            GoalCategory::Emergency,
            now(),
        ));
        ledger
    }

    #[test]
    fn test_resolve_reference() {
        let items = ["abc1", "abd2", "xyz"];
        let find = |r: &str| {
            resolve_reference(&items, r, |s, r| s.starts_with(r), FinFreeError::expense_not_found)
        };

        assert_eq!(find("abc").unwrap(), 0);
        assert_eq!(find("x").unwrap(), 2);
        assert!(find("ab").unwrap_err().is_validation());
        assert!(find("q").unwrap_err().is_not_found());
    }

    #[test]
    fn test_failed_save_leaves_ledger_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinFreePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::with_store(paths, Box::new(FailingStore));
        let mut ledger = seeded_ledger();
        let original = ledger.clone();
        let expense_id = ledger.expenses[0].id.to_string();
        let goal_id = ledger.goals[0].id.to_string();

        let err = ExpenseService::new(&storage, &mut ledger)
            .add(
                Money::from_units(5),
                ExpenseCategory::Transportation,
                "Bus",
                now().date_naive(),
                now(),
            )
            .unwrap_err();
        assert!(matches!(err, FinFreeError::Storage(_)));
        assert_eq!(ledger, original);

        assert!(ExpenseService::new(&storage, &mut ledger)
            .delete(&expense_id)
            .is_err());
        assert_eq!(ledger, original);

        assert!(GoalService::new(&storage, &mut ledger)
            .update_progress(&goal_id, Money::from_units(400), None, now())
            .is_err());
        assert_eq!(ledger, original);
        assert_eq!(ledger.goals[0].current, Money::from_units(100));
        assert_eq!(ledger.goals[0].history.len(), 1);
    }

    #[test]
    fn test_commit_adopts_change_after_save() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinFreePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::with_store(paths, Box::new(crate::storage::MemoryStore::new()));
        let mut ledger = Ledger::new();

        let count = commit(&storage, &mut ledger, |ledger| {
            ledger.goals.extend(seeded_ledger().goals);
            ledger.goals.len()
        })
        .unwrap();

        assert_eq!(count, 1);
        assert_eq!(ledger.goals.len(), 1);
        assert_eq!(storage.load_ledger().unwrap(), ledger);
    }
}
