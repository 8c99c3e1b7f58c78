//! Reports module for FinFree
//!
//! Pure computations over the ledger: budget comparison and insights, goal
//! timelines, petty-cash limits, expense and income summaries, and the
//! conscious spending plan. Nothing here touches storage or the clock;
//! callers pass `today` in.

pub mod budget_comparison;
pub mod budget_report;
pub mod goals;
pub mod income;
pub mod insights;
pub mod petty_cash;
pub mod spending;
pub mod spending_plan;

pub use budget_comparison::{
    aggregate_spending, compute_budget_comparison, BudgetComparison, BudgetStatus, BudgetTotals,
    CategoryComparison,
};
pub use budget_report::BudgetReport;
pub use goals::{
    compute_goal_insights, compute_goal_timeline, GoalInsight, GoalInsights, GoalProjection,
    GoalStats, GoalTimeline,
};
pub use income::{IncomeReport, IncomeStats};
pub use insights::{
    compute_insights, AlertSeverity, BudgetAlert, BudgetInsights, BudgetSummary, Recommendation,
    RecommendationKind,
};
pub use petty_cash::{compute_daily_status, DailyLimitStatus, PettyCashStats, SpendingAlert};
pub use spending::{top_categories, CategoryShare, ExpenseStats};
pub use spending_plan::{PlanComparison, SpendingPlan};
