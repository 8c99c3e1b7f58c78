//! Budget vs. actual comparison
//!
//! For a month, sums expenses per category and lines them up against the
//! month's budget. Every function here is a pure function of its inputs.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{Budget, Expense, ExpenseCategory, Money, MonthKey};

/// How far through its budget a category (or the whole month) is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// At most 50% spent
    Good,
    /// Over 50%, at most 80%
    Warning,
    /// Over 80%, at most 100%
    Caution,
    /// Over 100%
    Over,
}

impl BudgetStatus {
    /// Classify a spent percentage
    ///
    /// # Examples
    /// ```
    /// use finfree::reports::BudgetStatus;
    /// assert_eq!(BudgetStatus::classify(50.0), BudgetStatus::Good);
    /// assert_eq!(BudgetStatus::classify(80.0), BudgetStatus::Warning);
    /// assert_eq!(BudgetStatus::classify(100.0), BudgetStatus::Caution);
    /// assert_eq!(BudgetStatus::classify(100.1), BudgetStatus::Over);
    /// ```
    pub fn classify(percent_spent: f64) -> Self {
        if percent_spent <= 50.0 {
            Self::Good
        } else if percent_spent <= 80.0 {
            Self::Warning
        } else if percent_spent <= 100.0 {
            Self::Caution
        } else {
            Self::Over
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Caution => "caution",
            Self::Over => "over",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Budgeted vs. spent for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryComparison {
    pub category: ExpenseCategory,
    pub budgeted: Money,
    pub spent: Money,
    /// `budgeted - spent`; negative when over budget
    pub remaining: Money,
    pub percent_spent: f64,
    pub is_over_budget: bool,
    pub status: BudgetStatus,
}

impl CategoryComparison {
    pub fn new(category: ExpenseCategory, budgeted: Money, spent: Money) -> Self {
        let percent_spent = spent.percent_of(budgeted);
        Self {
            category,
            budgeted,
            spent,
            remaining: budgeted - spent,
            percent_spent,
            is_over_budget: spent > budgeted,
            status: BudgetStatus::classify(percent_spent),
        }
    }

    /// Amount spent beyond the budget (zero when within budget)
    pub fn overage(&self) -> Money {
        (-self.remaining).clamp_non_negative()
    }
}

/// Month-wide totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetTotals {
    pub budgeted: Money,
    pub spent: Money,
    pub remaining: Money,
    pub percent_spent: f64,
    pub is_over_budget: bool,
    pub status: BudgetStatus,
}

impl BudgetTotals {
    fn from_categories(categories: &[CategoryComparison]) -> Self {
        let budgeted: Money = categories.iter().map(|c| c.budgeted).sum();
        let spent: Money = categories.iter().map(|c| c.spent).sum();
        let percent_spent = spent.percent_of(budgeted);
        Self {
            budgeted,
            spent,
            remaining: budgeted - spent,
            percent_spent,
            is_over_budget: spent > budgeted,
            status: BudgetStatus::classify(percent_spent),
        }
    }
}

/// Comparison of a month's spending against its budget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetComparison {
    pub month: MonthKey,
    /// One row per expense category, in canonical category order
    pub categories: Vec<CategoryComparison>,
    pub totals: BudgetTotals,
}

impl BudgetComparison {
    /// Build the comparison for one budget
    pub fn new(budget: &Budget, spending: &BTreeMap<ExpenseCategory, Money>) -> Self {
        let categories: Vec<CategoryComparison> = ExpenseCategory::ALL
            .iter()
            .map(|&category| {
                CategoryComparison::new(
                    category,
                    budget.amount_for(category),
                    spending.get(&category).copied().unwrap_or_default(),
                )
            })
            .collect();

        let totals = BudgetTotals::from_categories(&categories);

        Self {
            month: budget.month,
            categories,
            totals,
        }
    }

    pub fn category(&self, category: ExpenseCategory) -> Option<&CategoryComparison> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Categories where spending exceeds the budget
    pub fn over_budget(&self) -> impl Iterator<Item = &CategoryComparison> {
        self.categories.iter().filter(|c| c.is_over_budget)
    }
}

/// Sum expenses per category for a month. Every category is present, with
/// zero when it has no expenses.
pub fn aggregate_spending(records: &[Expense], month: MonthKey) -> BTreeMap<ExpenseCategory, Money> {
    let mut totals: BTreeMap<ExpenseCategory, Money> = ExpenseCategory::ALL
        .iter()
        .map(|&category| (category, Money::zero()))
        .collect();

    for expense in records.iter().filter(|e| month.contains(e.date)) {
        *totals.entry(expense.category).or_default() += expense.amount;
    }

    totals
}

/// Compare a month's expenses against its budget.
///
/// Returns `None` when no budget exists for the month.
pub fn compute_budget_comparison(
    records: &[Expense],
    budgets: &BTreeMap<MonthKey, Budget>,
    month: MonthKey,
) -> Option<BudgetComparison> {
    let budget = budgets.get(&month)?;
    let spending = aggregate_spending(records, month);
    let comparison = BudgetComparison::new(budget, &spending);

    tracing::debug!(
        month = %month,
        budgeted = comparison.totals.budgeted.cents(),
        spent = comparison.totals.spent.cents(),
        "Computed budget comparison"
    );

    Some(comparison)
}
