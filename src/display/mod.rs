//! Display formatting for terminal output
//!
//! Turns report data into text. Amounts use the configured currency symbol.

pub mod budget;
pub mod goal;
pub mod petty_cash;
pub mod plan;
pub mod record;
pub mod report;

pub use budget::{format_budget_comparison, format_budget_insights, format_prefill, format_suggestions};
pub use goal::{format_goal_insights, format_goal_list, format_goal_stats};
pub use petty_cash::{format_daily_status, format_petty_stats};
pub use plan::{format_plan_comparison, format_spending_plan};
pub use record::{
    format_expense_list, format_expense_stats, format_income_list, format_income_summary,
    format_top_categories,
};
