//! Savings goal model
//!
//! A goal's `current` amount only changes through [`Goal::apply_progress`],
//! and every change appends to `history`. History is never rewritten.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::GoalCategory;
use super::ids::GoalId;
use super::money::Money;

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    MissingName,
    NonPositiveTarget,
    NegativeCurrent,
    AmountTooLarge,
    CurrentExceedsTarget,
    DeadlineInPast,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "Please enter a goal name"),
            Self::NonPositiveTarget => write!(f, "Please enter a valid target amount"),
            Self::NegativeCurrent => write!(f, "Amount cannot be negative"),
            Self::AmountTooLarge => {
                write!(f, "Amount cannot be larger than {}", Money::MAX_AMOUNT)
            }
            Self::CurrentExceedsTarget => {
                write!(f, "Current amount cannot exceed target amount")
            }
            Self::DeadlineInPast => write!(f, "Target date must be in the future"),
        }
    }
}

impl std::error::Error for GoalValidationError {}

/// Kind of change recorded in a goal's history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalAction {
    Created,
    Contribution,
    Withdrawal,
}

impl fmt::Display for GoalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "Created"),
            Self::Contribution => write!(f, "Contribution"),
            Self::Withdrawal => write!(f, "Withdrawal"),
        }
    }
}

/// One entry in a goal's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalHistoryEntry {
    pub date: NaiveDate,
    /// The goal's saved amount after this change
    pub amount: Money,
    /// Change relative to the previous amount
    #[serde(default)]
    pub difference: Money,
    pub action: GoalAction,
    #[serde(default)]
    pub note: String,
}

/// Outcome of a progress update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub previous: Money,
    pub difference: Money,
    /// True when this update crossed the target
    pub just_completed: bool,
}

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub name: String,
    pub target: Money,
    pub current: Money,
    pub deadline: NaiveDate,
    pub category: GoalCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub history: Vec<GoalHistoryEntry>,
}

impl Goal {
    /// Create a goal with its initial `created` history entry
    pub fn new(
        name: impl Into<String>,
        target: Money,
        current: Money,
        deadline: NaiveDate,
        category: GoalCategory,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: GoalId::new(),
            name: name.into().trim().to_string(),
            target,
            current,
            deadline,
            category,
            created_at: now,
            updated_at: now,
            history: vec![GoalHistoryEntry {
                date: now.date_naive(),
                amount: current,
                difference: Money::zero(),
                action: GoalAction::Created,
                note: "Goal created".to_string(),
            }],
        }
    }

    /// Validate a goal at creation time
    pub fn validate(&self, today: NaiveDate) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::MissingName);
        }
        if !self.target.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget);
        }
        if self.current.is_negative() {
            return Err(GoalValidationError::NegativeCurrent);
        }
        if self.target.exceeds_max() {
            return Err(GoalValidationError::AmountTooLarge);
        }
        if self.current > self.target {
            return Err(GoalValidationError::CurrentExceedsTarget);
        }
        if self.deadline < today {
            return Err(GoalValidationError::DeadlineInPast);
        }
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        self.current >= self.target
    }

    pub fn is_started(&self) -> bool {
        self.current.is_positive()
    }

    /// Amount still needed (never negative)
    pub fn remaining(&self) -> Money {
        (self.target - self.current).clamp_non_negative()
    }

    /// Progress toward the target, capped at 100
    pub fn progress_percent(&self) -> f64 {
        self.current.percent_of(self.target).min(100.0)
    }

    /// Set a new absolute saved amount and record it in the history.
    ///
    /// Amounts above the target are accepted. An empty note gets a default
    /// matching the direction of the change.
    pub fn apply_progress(
        &mut self,
        new_amount: Money,
        note: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<ProgressUpdate, GoalValidationError> {
        if new_amount.is_negative() {
            return Err(GoalValidationError::NegativeCurrent);
        }
        if new_amount.exceeds_max() {
            return Err(GoalValidationError::AmountTooLarge);
        }

        let previous = self.current;
        let difference = new_amount - previous;
        let action = if difference.is_positive() {
            GoalAction::Contribution
        } else {
            GoalAction::Withdrawal
        };
        let note = match note.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ if action == GoalAction::Contribution => "Added funds".to_string(),
            _ => "Withdrew funds".to_string(),
        };

        self.current = new_amount;
        self.updated_at = now;
        self.history.push(GoalHistoryEntry {
            date: now.date_naive(),
            amount: new_amount,
            difference,
            action,
            note,
        });

        Ok(ProgressUpdate {
            previous,
            difference,
            just_completed: new_amount >= self.target && previous < self.target,
        })
    }

    /// Positive contributions, oldest first
    pub fn contributions(&self) -> impl Iterator<Item = &GoalHistoryEntry> {
        self.history
            .iter()
            .filter(|h| h.action == GoalAction::Contribution && h.difference.is_positive())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} / {} by {}",
            self.name, self.category, self.current, self.target, self.deadline
        )
    }
}
