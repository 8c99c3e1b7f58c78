//! Expense service
//!
//! Adding, listing and deleting expense records.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::audit::EntityType;
use crate::error::{FinFreeError, FinFreeResult};
use crate::models::{Expense, ExpenseCategory, Money, MonthKey};
use crate::state::Ledger;
use crate::storage::Storage;

use super::{commit, resolve_reference};

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub month: Option<MonthKey>,
    pub category: Option<ExpenseCategory>,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn month(mut self, month: MonthKey) -> Self {
        self.month = Some(month);
        self
    }

    pub fn category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn accepts(&self, expense: &Expense) -> bool {
        self.month.map_or(true, |m| m.contains(expense.date))
            && self.category.map_or(true, |c| c == expense.category)
    }
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    ledger: &'a mut Ledger,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage, ledger: &'a mut Ledger) -> Self {
        Self { storage, ledger }
    }

    /// Record a new expense
    pub fn add(
        &mut self,
        amount: Money,
        category: ExpenseCategory,
        description: &str,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> FinFreeResult<Expense> {
        let expense = Expense::new(amount, category, description, date, now);
        expense
            .validate()
            .map_err(|e| FinFreeError::Validation(e.to_string()))?;

        commit(self.storage, self.ledger, |ledger| {
            ledger.expenses.push(expense.clone())
        })?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        info!(id = %expense.id, amount = %expense.amount, category = %expense.category, "expense added");
        Ok(expense)
    }

    pub fn records(&self) -> &[Expense] {
        &self.ledger.expenses
    }

    /// Expenses matching `filter`, newest first
    pub fn list(&self, filter: &ExpenseFilter) -> Vec<&Expense> {
        let mut expenses: Vec<&Expense> = self
            .ledger
            .expenses
            .iter()
            .filter(|e| filter.accepts(e))
            .collect();

        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.timestamp.cmp(&a.timestamp)));

        if let Some(limit) = filter.limit {
            expenses.truncate(limit);
        }
        expenses
    }

    /// Look up an expense by full or shortened ID
    pub fn find(&self, reference: &str) -> FinFreeResult<&Expense> {
        let index = resolve_reference(
            &self.ledger.expenses,
            reference,
            |e, r| e.id.matches(r),
            FinFreeError::expense_not_found,
        )?;
        Ok(&self.ledger.expenses[index])
    }

    /// Delete an expense by full or shortened ID
    pub fn delete(&mut self, reference: &str) -> FinFreeResult<Expense> {
        let index = resolve_reference(
            &self.ledger.expenses,
            reference,
            |e, r| e.id.matches(r),
            FinFreeError::expense_not_found,
        )?;

        let removed = commit(self.storage, self.ledger, |ledger| ledger.expenses.remove(index))?;

        self.storage.log_delete(
            EntityType::Expense,
            removed.id.to_string(),
            Some(removed.description.clone()),
            &removed,
        )?;

        info!(id = %removed.id, "expense deleted");
        Ok(removed)
    }
}
