//! Goal service
//!
//! Savings goals: creation, progress updates and deletion.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::audit::EntityType;
use crate::error::{FinFreeError, FinFreeResult};
use crate::models::{Goal, GoalCategory, Money, ProgressUpdate};
use crate::state::Ledger;
use crate::storage::Storage;

use super::{commit, resolve_reference};

/// Input for creating a new goal
#[derive(Debug, Clone)]
pub struct CreateGoalInput {
    pub name: String,
    pub target: Money,
    pub current: Money,
    pub deadline: NaiveDate,
    pub category: GoalCategory,
}

/// Service for goal management
pub struct GoalService<'a> {
    storage: &'a Storage,
    ledger: &'a mut Ledger,
}

impl<'a> GoalService<'a> {
    pub fn new(storage: &'a Storage, ledger: &'a mut Ledger) -> Self {
        Self { storage, ledger }
    }

    /// Create a goal. The deadline may be today but not earlier.
    pub fn create(
        &mut self,
        input: CreateGoalInput,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> FinFreeResult<Goal> {
        let goal = Goal::new(
            input.name,
            input.target,
            input.current,
            input.deadline,
            input.category,
            now,
        );
        goal.validate(today)
            .map_err(|e| FinFreeError::Validation(e.to_string()))?;

        commit(self.storage, self.ledger, |ledger| ledger.goals.push(goal.clone()))?;

        self.storage.log_create(
            EntityType::Goal,
            goal.id.to_string(),
            Some(goal.name.clone()),
            &goal,
        )?;

        info!(id = %goal.id, name = %goal.name, target = %goal.target, "goal created");
        Ok(goal)
    }

    pub fn list(&self) -> &[Goal] {
        &self.ledger.goals
    }

    pub fn find(&self, reference: &str) -> FinFreeResult<&Goal> {
        let index = self.index_of(reference)?;
        Ok(&self.ledger.goals[index])
    }

    /// Set a goal's saved amount, recording a contribution or withdrawal
    pub fn update_progress(
        &mut self,
        reference: &str,
        new_amount: Money,
        note: Option<&str>,
        now: DateTime<Utc>,
    ) -> FinFreeResult<(Goal, ProgressUpdate)> {
        let index = self.index_of(reference)?;
        let before = self.ledger.goals[index].clone();

        let mut after = before.clone();
        let update = after
            .apply_progress(new_amount, note, now)
            .map_err(|e| FinFreeError::Validation(e.to_string()))?;

        commit(self.storage, self.ledger, |ledger| {
            ledger.goals[index] = after.clone()
        })?;

        self.storage.log_update(
            EntityType::Goal,
            after.id.to_string(),
            Some(after.name.clone()),
            &before,
            &after,
            Some(format!("current: {} -> {}", before.current, after.current)),
        )?;

        info!(
            id = %after.id,
            difference = %update.difference,
            completed = update.just_completed,
            "goal progress updated"
        );
        Ok((after, update))
    }

    pub fn delete(&mut self, reference: &str) -> FinFreeResult<Goal> {
        let index = self.index_of(reference)?;
        let removed = commit(self.storage, self.ledger, |ledger| ledger.goals.remove(index))?;

        self.storage.log_delete(
            EntityType::Goal,
            removed.id.to_string(),
            Some(removed.name.clone()),
            &removed,
        )?;

        info!(id = %removed.id, "goal deleted");
        Ok(removed)
    }

    fn index_of(&self, reference: &str) -> FinFreeResult<usize> {
        resolve_reference(
            &self.ledger.goals,
            reference,
            |g, r| g.id.matches(r),
            FinFreeError::goal_not_found,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinFreePaths;
    use crate::models::GoalAction;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinFreePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::with_store(paths, Box::new(MemoryStore::new()));
        (temp_dir, storage)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    fn input(target: i64, current: i64, deadline: NaiveDate) -> CreateGoalInput {
        CreateGoalInput {
            name: "Emergency fund".into(),
            target: Money::from_units(target),
            current: Money::from_units(current),
            deadline,
            category: GoalCategory::Emergency,
        }
    }

    #[test]
    fn test_create_goal() {
        let (_temp_dir, storage) = create_test_storage();
        let mut ledger = Ledger::new();
        let today = now().date_naive();

        let goal = GoalService::new(&storage, &mut ledger)
            .create(input(1000, 100, today), today, now())
            .unwrap();

        assert_eq!(goal.history.len(), 1);
        assert_eq!(goal.history[0].action, GoalAction::Created);
        assert_eq!(storage.load_ledger().unwrap().goals.len(), 1);
    }

    #[test]
    fn test_create_rejects_past_deadline_and_overfunded() {
        let (_temp_dir, storage) = create_test_storage();
        let mut ledger = Ledger::new();
        let mut service = GoalService::new(&storage, &mut ledger);
        let today = now().date_naive();
        let yesterday = today.pred_opt().unwrap();

        assert!(service
            .create(input(1000, 0, yesterday), today, now())
            .unwrap_err()
            .is_validation());
        assert!(service
            .create(input(1000, 1500, today), today, now())
            .unwrap_err()
            .is_validation());
        assert!(service.list().is_empty());
    }

    #[test]
    fn test_update_progress_to_completion() {
        let (_temp_dir, storage) = create_test_storage();
        let mut ledger = Ledger::new();
        let mut service = GoalService::new(&storage, &mut ledger);
        let today = now().date_naive();

        let goal = service
            .create(input(1000, 400, today), today, now())
            .unwrap();
        let id = goal.id.to_string();

        let (_, update) = service
            .update_progress(&id, Money::from_units(700), None, now())
            .unwrap();
        assert_eq!(update.difference, Money::from_units(300));
        assert!(!update.just_completed);

        let (goal, update) = service
            .update_progress(&id, Money::from_units(1000), Some("Bonus"), now())
            .unwrap();
        assert!(update.just_completed);
        assert_eq!(goal.history.len(), 3);
        assert_eq!(goal.history[2].note, "Bonus");

        let (goal, _) = service
            .update_progress(&id, Money::from_units(900), None, now())
            .unwrap();
        assert_eq!(goal.history[3].action, GoalAction::Withdrawal);
        assert_eq!(goal.history[3].note, "Withdrew funds");

        assert!(service
            .update_progress(&id, Money::from_units(-1), None, now())
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_delete_goal() {
        let (_temp_dir, storage) = create_test_storage();
        let mut ledger = Ledger::new();
        let mut service = GoalService::new(&storage, &mut ledger);
        let today = now().date_naive();

        let goal = service.create(input(500, 0, today), today, now()).unwrap();
        service.delete(&goal.id.to_string()).unwrap();

        assert!(service.find(&goal.id.to_string()).unwrap_err().is_not_found());
        assert_eq!(storage.audit().entry_count().unwrap(), 2);
    }
}
