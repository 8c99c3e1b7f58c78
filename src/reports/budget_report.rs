//! Exportable monthly budget report

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::budget_comparison::{compute_budget_comparison, BudgetComparison};
use super::insights::{compute_insights, BudgetInsights};
use crate::error::FinFreeResult;
use crate::models::MonthKey;
use crate::state::Ledger;

/// Comparison plus insights for one month, serialized as pretty JSON
#[derive(Debug, Clone, Serialize)]
pub struct BudgetReport {
    pub month: MonthKey,
    pub month_name: String,
    pub comparison: BudgetComparison,
    pub insights: BudgetInsights,
    pub generated_at: DateTime<Utc>,
}

impl BudgetReport {
    /// Build the report, or `None` when the month has no budget
    pub fn generate(ledger: &Ledger, month: MonthKey, now: DateTime<Utc>) -> Option<Self> {
        let comparison = compute_budget_comparison(&ledger.expenses, &ledger.budgets, month)?;
        let insights = compute_insights(&comparison);

        Some(Self {
            month,
            month_name: month.long_name(),
            comparison,
            insights,
            generated_at: now,
        })
    }

    pub fn to_json_pretty(&self) -> FinFreeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Default export file name, e.g. `budget_report_2025-01.json`
    pub fn default_file_name(&self) -> String {
        format!("budget_report_{}.json", self.month)
    }
}
