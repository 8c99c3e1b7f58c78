//! CLI command handlers
//!
//! Bridges clap argument parsing with the service and report layers. The
//! binary reads the clock once into a [`Clock`] and every handler takes its
//! dates from there.

pub mod audit;
pub mod budget;
pub mod expense;
pub mod goal;
pub mod income;
pub mod petty;
pub mod plan;

pub use audit::handle_audit_command;
pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use petty::{handle_petty_command, PettyCommands};
pub use plan::{handle_plan_command, PlanArgs};

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::error::{FinFreeError, FinFreeResult};
use crate::models::{Money, MonthKey};

/// The moment a command runs
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    /// Calendar date in the user's local time zone
    pub today: NaiveDate,
    pub now: DateTime<Utc>,
}

impl Clock {
    /// Read the system clock
    pub fn system() -> Self {
        let local = Local::now();
        Self {
            today: local.date_naive(),
            now: local.with_timezone(&Utc),
        }
    }

    /// A fixed clock
    pub fn fixed(today: NaiveDate, now: DateTime<Utc>) -> Self {
        Self { today, now }
    }

    pub fn current_month(&self) -> MonthKey {
        MonthKey::from_date(self.today)
    }
}

/// Parse a user-supplied amount
pub(crate) fn parse_amount(input: &str) -> FinFreeResult<Money> {
    Money::parse(input).map_err(|e| FinFreeError::Validation(format!("Invalid amount: {}", e)))
}

/// Parse `YYYY-MM-DD`, defaulting to today
pub(crate) fn parse_date_or_today(input: Option<&str>, clock: &Clock) -> FinFreeResult<NaiveDate> {
    match input {
        None => Ok(clock.today),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            FinFreeError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s))
        }),
    }
}

/// Parse `YYYY-MM`, defaulting to the current month
pub(crate) fn parse_month_or_current(input: Option<&str>, clock: &Clock) -> FinFreeResult<MonthKey> {
    match input {
        None => Ok(clock.current_month()),
        Some(s) => MonthKey::parse(s).map_err(|e| FinFreeError::Validation(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> Clock {
        let today = NaiveDate::from_ymd_opt(2025, 7, 9).unwrap();
        Clock::fixed(today, Utc::now())
    }

    #[test]
    fn test_parse_helpers() {
        let clock = clock();
        assert_eq!(parse_amount("12.50").unwrap(), Money::from_cents(1250));
        assert!(parse_amount("twelve").unwrap_err().is_validation());

        assert_eq!(parse_date_or_today(None, &clock).unwrap(), clock.today);
        assert!(parse_date_or_today(Some("09/07/2025"), &clock).is_err());

        assert_eq!(
            parse_month_or_current(None, &clock).unwrap().to_string(),
            "2025-07"
        );
        assert_eq!(
            parse_month_or_current(Some("2024-12"), &clock).unwrap().to_string(),
            "2024-12"
        );
        assert!(parse_month_or_current(Some("2024-13"), &clock).is_err());
    }
}
