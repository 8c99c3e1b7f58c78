//! Core data models for FinFree
//!
//! Money records, budgets, goals and the closed tag enumerations they share.

pub mod budget;
pub mod category;
pub mod goal;
pub mod ids;
pub mod money;
pub mod month;
pub mod record;

pub use budget::{Budget, BudgetValidationError};
pub use category::{ExpenseCategory, GoalCategory, IncomeSource, TagParseError};
pub use goal::{Goal, GoalAction, GoalHistoryEntry, GoalValidationError, ProgressUpdate};
pub use ids::{ExpenseId, GoalId, IncomeId, PettyCashId};
pub use money::{Money, MoneyParseError};
pub use month::{MonthKey, MonthParseError};
pub use record::{
    Expense, Income, PettyCashEntry, RecordValidationError, RecurrenceFrequency, RecurringInfo,
};
