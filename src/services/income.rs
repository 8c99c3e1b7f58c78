//! Income service
//!
//! Adding and deleting income entries, including recurring series. A
//! recurring entry spawns one generated entry per occurrence; deleting the
//! parent removes the whole series.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{FinFreeError, FinFreeResult};
use crate::models::{Income, IncomeSource, Money, MonthKey, RecurrenceFrequency, RecurringInfo};
use crate::state::Ledger;
use crate::storage::Storage;

use super::{commit, resolve_reference};

/// Step-by-step collection of recurrence settings.
///
/// Each state says what it needs next; [`answer`](Self::answer) feeds one
/// reply and returns the following state, so any front end can drive it
/// without blocking inside the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrencePlan {
    NeedsFrequency,
    NeedsMonths(RecurrenceFrequency),
    Ready(RecurringInfo),
}

impl RecurrencePlan {
    pub fn start() -> Self {
        Self::NeedsFrequency
    }

    /// Question for the next answer, or `None` once complete
    pub fn prompt(&self) -> Option<String> {
        match self {
            Self::NeedsFrequency => {
                let mut text = String::from("How often does this income recur?");
                for (i, frequency) in RecurrenceFrequency::ALL.iter().enumerate() {
                    text.push_str(&format!("\n{}. {}", i + 1, frequency.label()));
                }
                text.push_str(&format!(
                    "\nEnter number (1-{}):",
                    RecurrenceFrequency::ALL.len()
                ));
                Some(text)
            }
            Self::NeedsMonths(_) => Some(format!(
                "For how many months should this recur? (1-{}) [{}]:",
                RecurringInfo::MAX_MONTHS,
                RecurringInfo::DEFAULT_MONTHS
            )),
            Self::Ready(_) => None,
        }
    }

    /// Feed one answer. Frequencies accept a menu number or a name; an
    /// empty month count takes the default.
    pub fn answer(self, input: &str) -> FinFreeResult<Self> {
        match self {
            Self::NeedsFrequency => RecurrenceFrequency::parse(input)
                .map(Self::NeedsMonths)
                .ok_or_else(|| {
                    FinFreeError::Validation(format!("Unknown frequency: {}", input.trim()))
                }),
            Self::NeedsMonths(frequency) => {
                let input = input.trim();
                let months = if input.is_empty() {
                    RecurringInfo::DEFAULT_MONTHS
                } else {
                    input.parse().map_err(|_| {
                        FinFreeError::Validation(format!("Invalid month count: {}", input))
                    })?
                };
                RecurringInfo::new(frequency, months)
                    .map(Self::Ready)
                    .map_err(|e| FinFreeError::Validation(e.to_string()))
            }
            Self::Ready(_) => Ok(self),
        }
    }

    pub fn info(&self) -> Option<RecurringInfo> {
        match self {
            Self::Ready(info) => Some(*info),
            _ => None,
        }
    }
}

/// Service for income management
pub struct IncomeService<'a> {
    storage: &'a Storage,
    ledger: &'a mut Ledger,
}

impl<'a> IncomeService<'a> {
    pub fn new(storage: &'a Storage, ledger: &'a mut Ledger) -> Self {
        Self { storage, ledger }
    }

    /// Record income. With `recurrence`, the generated future entries are
    /// created too. Returns the new entry followed by any generated ones.
    pub fn add(
        &mut self,
        amount: Money,
        source: IncomeSource,
        description: &str,
        date: NaiveDate,
        recurrence: Option<RecurringInfo>,
        now: DateTime<Utc>,
    ) -> FinFreeResult<Vec<Income>> {
        let mut parent = Income::new(amount, source, description, date, now);
        parent
            .validate()
            .map_err(|e| FinFreeError::Validation(e.to_string()))?;

        let mut created = Vec::new();
        if let Some(info) = recurrence {
            parent.recurring = true;
            created.push(parent.clone());

            for occurrence in 1..=info.months {
                let mut child = Income::new(
                    parent.amount,
                    parent.source,
                    format!(
                        "{} ({} #{})",
                        parent.description,
                        info.frequency.as_str(),
                        occurrence + 1
                    ),
                    info.occurrence_date(parent.date, occurrence),
                    now,
                );
                child.recurring = true;
                child.parent_id = Some(parent.id);
                created.push(child);
            }

            created[0].recurring_info = Some(info);
        } else {
            created.push(parent);
        }

        commit(self.storage, self.ledger, |ledger| {
            ledger.income.extend(created.iter().cloned())
        })?;

        let entries: Vec<AuditEntry> = created
            .iter()
            .map(|i| {
                AuditEntry::create(
                    EntityType::Income,
                    i.id.to_string(),
                    Some(i.description.clone()),
                    i,
                )
            })
            .collect();
        self.storage.audit().log_batch(&entries)?;

        info!(
            id = %created[0].id,
            amount = %amount,
            generated = created.len() - 1,
            "income added"
        );
        Ok(created)
    }

    /// Income entries, optionally for one month, newest first
    pub fn list(&self, month: Option<MonthKey>) -> Vec<&Income> {
        let mut income: Vec<&Income> = self
            .ledger
            .income
            .iter()
            .filter(|i| month.map_or(true, |m| m.contains(i.date)))
            .collect();
        income.sort_by(|a, b| b.date.cmp(&a.date).then(b.timestamp.cmp(&a.timestamp)));
        income
    }

    pub fn find(&self, reference: &str) -> FinFreeResult<&Income> {
        let index = resolve_reference(
            &self.ledger.income,
            reference,
            |i, r| i.id.matches(r),
            FinFreeError::income_not_found,
        )?;
        Ok(&self.ledger.income[index])
    }

    /// Delete an entry and every entry generated from it. Returns the
    /// removed entries, the requested one first.
    pub fn delete(&mut self, reference: &str) -> FinFreeResult<Vec<Income>> {
        let index = resolve_reference(
            &self.ledger.income,
            reference,
            |i, r| i.id.matches(r),
            FinFreeError::income_not_found,
        )?;
        let target = self.ledger.income[index].id;

        let mut removed = commit(self.storage, self.ledger, |ledger| {
            let (removed, kept): (Vec<Income>, Vec<Income>) = std::mem::take(&mut ledger.income)
                .into_iter()
                .partition(|i| i.id == target || i.parent_id == Some(target));
            ledger.income = kept;
            removed
        })?;
        removed.sort_by_key(|i| i.id != target);

        let entries: Vec<AuditEntry> = removed
            .iter()
            .map(|i| {
                AuditEntry::delete(
                    EntityType::Income,
                    i.id.to_string(),
                    Some(i.description.clone()),
                    i,
                )
            })
            .collect();
        self.storage.audit().log_batch(&entries)?;

        info!(id = %target, removed = removed.len(), "income deleted");
        Ok(removed)
    }
}
