//! Petty cash service
//!
//! Small daily cash purchases tracked against the daily limit. Going over
//! the limit is reported but never blocks the purchase.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

use crate::audit::EntityType;
use crate::error::{FinFreeError, FinFreeResult};
use crate::models::{Money, PettyCashEntry};
use crate::reports::petty_cash::{compute_daily_status, spent_on, DailyLimitStatus};
use crate::state::Ledger;
use crate::storage::Storage;

use super::{commit, resolve_reference};

/// Result of recording a petty-cash purchase
#[derive(Debug, Clone)]
pub struct PettyCashOutcome {
    pub entry: PettyCashEntry,
    /// How far this purchase took the day past its limit
    pub over_limit_by: Option<Money>,
    /// The day's status after the purchase
    pub status: DailyLimitStatus,
}

/// Service for petty-cash entries
pub struct PettyCashService<'a> {
    storage: &'a Storage,
    ledger: &'a mut Ledger,
}

impl<'a> PettyCashService<'a> {
    pub fn new(storage: &'a Storage, ledger: &'a mut Ledger) -> Self {
        Self { storage, ledger }
    }

    /// How far over `limit` the day would be after spending `amount`
    pub fn projected_overage(&self, amount: Money, date: NaiveDate, limit: Money) -> Option<Money> {
        let total = spent_on(&self.ledger.petty_cash, date) + amount;
        (total > limit).then(|| total - limit)
    }

    /// Record a purchase dated `today`
    pub fn add(
        &mut self,
        amount: Money,
        description: &str,
        time: &str,
        today: NaiveDate,
        limit: Money,
        now: DateTime<Utc>,
    ) -> FinFreeResult<PettyCashOutcome> {
        let entry = PettyCashEntry::new(amount, description, time, today, now);
        entry
            .validate()
            .map_err(|e| FinFreeError::Validation(e.to_string()))?;

        let over_limit_by = self.projected_overage(amount, today, limit);

        commit(self.storage, self.ledger, |ledger| {
            ledger.petty_cash.push(entry.clone())
        })?;

        self.storage.log_create(
            EntityType::PettyCash,
            entry.id.to_string(),
            Some(entry.description.clone()),
            &entry,
        )?;

        info!(id = %entry.id, amount = %entry.amount, "petty cash entry added");
        if let Some(over) = over_limit_by {
            warn!(%over, %limit, "petty cash daily limit exceeded");
        }

        Ok(PettyCashOutcome {
            status: compute_daily_status(&self.ledger.petty_cash, limit, today),
            entry,
            over_limit_by,
        })
    }

    /// Entries for one day, latest time first
    pub fn entries_on(&self, date: NaiveDate) -> Vec<&PettyCashEntry> {
        let mut entries: Vec<&PettyCashEntry> = self
            .ledger
            .petty_cash
            .iter()
            .filter(|e| e.date == date)
            .collect();
        entries.sort_by(|a, b| b.time.cmp(&a.time));
        entries
    }

    pub fn delete(&mut self, reference: &str) -> FinFreeResult<PettyCashEntry> {
        let index = resolve_reference(
            &self.ledger.petty_cash,
            reference,
            |e, r| e.id.matches(r),
            FinFreeError::petty_cash_not_found,
        )?;

        let removed = commit(self.storage, self.ledger, |ledger| {
            ledger.petty_cash.remove(index)
        })?;

        self.storage.log_delete(
            EntityType::PettyCash,
            removed.id.to_string(),
            Some(removed.description.clone()),
            &removed,
        )?;

        info!(id = %removed.id, "petty cash entry deleted");
        Ok(removed)
    }
}
