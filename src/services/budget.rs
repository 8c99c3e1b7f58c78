//! Budget service
//!
//! Monthly budgets per expense category, plus suggestions for a new month
//! drawn from the previous budget or from recent spending.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::audit::EntityType;
use crate::error::{FinFreeError, FinFreeResult};
use crate::models::{Budget, ExpenseCategory, Money, MonthKey};
use crate::reports::spending::category_total;
use crate::state::Ledger;
use crate::storage::Storage;

use super::commit;

/// Months of spending history used for suggestions, current month included
pub const SUGGESTION_WINDOW_MONTHS: u32 = 3;

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

/// Suggested amount for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSuggestion {
    pub category: ExpenseCategory,
    /// Average over the months in the window that had any spending
    pub average: Money,
    /// Average plus 10%, rounded up to whole currency units
    pub suggested: Money,
}

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
    ledger: &'a mut Ledger,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage, ledger: &'a mut Ledger) -> Self {
        Self { storage, ledger }
    }

    pub fn get(&self, month: MonthKey) -> Option<&Budget> {
        self.ledger.budget_for(month)
    }

    /// Store the budget for `month`, replacing any existing one.
    /// Categories left out are budgeted at zero.
    pub fn set(
        &mut self,
        month: MonthKey,
        amounts: impl IntoIterator<Item = (ExpenseCategory, Money)>,
        now: DateTime<Utc>,
    ) -> FinFreeResult<Budget> {
        let mut budget = Budget::with_amounts(month, amounts, now);
        budget
            .validate()
            .map_err(|e| FinFreeError::Validation(e.to_string()))?;

        let before = self.ledger.budgets.get(&month).cloned();
        if let Some(existing) = &before {
            budget.created_at = existing.created_at;
        }

        commit(self.storage, self.ledger, |ledger| {
            ledger.budgets.insert(month, budget.clone());
        })?;

        let name = Some(format!("Budget for {}", month.long_name()));
        match &before {
            Some(before) => self.storage.log_update(
                EntityType::Budget,
                month.to_string(),
                name,
                before,
                &budget,
                None,
            )?,
            None => self
                .storage
                .log_create(EntityType::Budget, month.to_string(), name, &budget)?,
        }

        info!(%month, total = %budget.total(), replaced = before.is_some(), "budget saved");
        Ok(budget)
    }

    /// The previous month's amounts, if that month has a budget
    pub fn prefill(&self, month: MonthKey) -> Option<BTreeMap<ExpenseCategory, Money>> {
        self.ledger
            .budget_for(month.prev())
            .map(|b| b.amounts.clone())
    }

    /// Suggestions from the last three months of spending ending with
    /// `month`. Categories with no spending in the window are left out.
    pub fn suggest(&self, month: MonthKey) -> Vec<BudgetSuggestion> {
        let window = month.trailing(SUGGESTION_WINDOW_MONTHS);

        ExpenseCategory::ALL
            .iter()
            .filter_map(|&category| {
                let spent: Vec<i128> = window
                    .iter()
                    .map(|&m| i128::from(category_total(&self.ledger.expenses, m, category).cents()))
                    .filter(|&cents| cents > 0)
                    .collect();
                if spent.is_empty() {
                    return None;
                }

                let total: i128 = spent.iter().sum();
                let count = spent.len() as i128;
                // ceil(total / count * 1.1) in whole units, kept in integers
                let divisor = count * 1000;
                let suggested_units = (total * 11 + divisor - 1) / divisor;
                // Round half up to the nearest cent
                let average_cents = (2 * total + count) / (2 * count);

                Some(BudgetSuggestion {
                    category,
                    average: Money::from_cents(saturate(average_cents)),
                    suggested: Money::from_units(saturate(suggested_units)),
                })
            })
            .collect()
    }
}
