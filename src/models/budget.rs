//! Monthly budget model
//!
//! One budget per calendar month, mapping each expense category to the amount
//! planned for it. Re-creating a month's budget replaces it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::category::ExpenseCategory;
use super::money::Money;
use super::month::MonthKey;

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeAmount(ExpenseCategory),
    AmountTooLarge(ExpenseCategory),
    EmptyBudget,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(category) => {
                write!(f, "Budget amounts cannot be negative ({})", category)
            }
            Self::AmountTooLarge(category) => write!(
                f,
                "Budget amount for {} cannot be larger than {}",
                category,
                Money::MAX_AMOUNT
            ),
            Self::EmptyBudget => write!(f, "Please set at least one budget amount"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

/// A budget for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub month: MonthKey,

    /// Planned amount per category; categories not present are budgeted 0
    #[serde(default)]
    pub amounts: BTreeMap<ExpenseCategory, Money>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(month: MonthKey, now: DateTime<Utc>) -> Self {
        Self {
            month,
            amounts: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a budget from category amounts
    pub fn with_amounts(
        month: MonthKey,
        amounts: impl IntoIterator<Item = (ExpenseCategory, Money)>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut budget = Self::new(month, now);
        budget.amounts.extend(amounts);
        budget
    }

    /// Amount budgeted for a category (0 when unset)
    pub fn amount_for(&self, category: ExpenseCategory) -> Money {
        self.amounts.get(&category).copied().unwrap_or_default()
    }

    pub fn set_amount(&mut self, category: ExpenseCategory, amount: Money, now: DateTime<Utc>) {
        self.amounts.insert(category, amount);
        self.updated_at = now;
    }

    pub fn total(&self) -> Money {
        self.amounts.values().sum()
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if let Some((category, _)) = self.amounts.iter().find(|(_, amount)| amount.is_negative()) {
            return Err(BudgetValidationError::NegativeAmount(*category));
        }
        if let Some((category, _)) = self.amounts.iter().find(|(_, amount)| amount.exceeds_max()) {
            return Err(BudgetValidationError::AmountTooLarge(*category));
        }

        if !self.total().is_positive() {
            return Err(BudgetValidationError::EmptyBudget);
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} budget: {}", self.month, self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month() -> MonthKey {
        MonthKey::new(2025, 1).unwrap()
    }

    #[test]
    fn test_amount_for_defaults_to_zero() {
        let budget = Budget::with_amounts(
            month(),
            [(ExpenseCategory::Food, Money::from_units(300))],
            Utc::now(),
        );
        assert_eq!(budget.amount_for(ExpenseCategory::Food), Money::from_units(300));
        assert_eq!(budget.amount_for(ExpenseCategory::Bills), Money::zero());
        assert_eq!(budget.total(), Money::from_units(300));
    }

    #[test]
    fn test_validate_rejects_negative() {
        let budget = Budget::with_amounts(
            month(),
            [
                (ExpenseCategory::Food, Money::from_units(300)),
                (ExpenseCategory::Bills, Money::from_units(-5)),
            ],
            Utc::now(),
        );
        assert_eq!(
            budget.validate(),
            Err(BudgetValidationError::NegativeAmount(ExpenseCategory::Bills))
        );
    }

    #[test]
    fn test_validate_rejects_all_zero() {
        let budget = Budget::with_amounts(
            month(),
            [(ExpenseCategory::Food, Money::zero())],
            Utc::now(),
        );
        assert_eq!(budget.validate(), Err(BudgetValidationError::EmptyBudget));
        assert_eq!(Budget::new(month(), Utc::now()).validate(), Err(BudgetValidationError::EmptyBudget));
    }

    #[test]
    fn test_serializes_category_keys() {
        let budget = Budget::with_amounts(
            month(),
            [(ExpenseCategory::Food, Money::from_units(300))],
            Utc::now(),
        );
        let json = serde_json::to_value(&budget).unwrap();
        assert_eq!(json["month"], "2025-01");
        assert_eq!(json["amounts"]["food"], 30000);
    }
}
