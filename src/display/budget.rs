//! Budget display formatting
//!
//! Renders the budget-vs-actual table, insights and suggestions.

use std::collections::BTreeMap;

use crate::config::settings::Settings;
use crate::models::{ExpenseCategory, Money};
use crate::reports::{BudgetComparison, BudgetInsights, RecommendationKind};
use crate::services::BudgetSuggestion;

use super::report::{format_bar, format_percentage, separator, status_marker};

const WIDTH: usize = 72;

/// Budget vs. actual table for one month
pub fn format_budget_comparison(comparison: &BudgetComparison, settings: &Settings) -> String {
    let money = |m: Money| settings.format_money(m);
    let mut output = String::new();

    output.push_str(&format!(
        "{:<16} {:>11} {:>11} {:>11} {:>7}\n",
        "Category", "Budgeted", "Spent", "Remaining", "Used"
    ));
    output.push_str(&separator(WIDTH));
    output.push('\n');

    for row in &comparison.categories {
        if row.budgeted.is_zero() && row.spent.is_zero() {
            continue;
        }
        output.push_str(&format!(
            "{:<16} {:>11} {:>11} {:>11} {:>7} {} {}\n",
            row.category.label(),
            money(row.budgeted),
            money(row.spent),
            money(row.remaining),
            format_percentage(row.percent_spent),
            format_bar(row.percent_spent, 100.0, 8),
            status_marker(row.status),
        ));
    }

    let totals = &comparison.totals;
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:<16} {:>11} {:>11} {:>11} {:>7} {} {}\n",
        "TOTAL",
        money(totals.budgeted),
        money(totals.spent),
        money(totals.remaining),
        format_percentage(totals.percent_spent),
        format_bar(totals.percent_spent, 100.0, 8),
        status_marker(totals.status),
    ));

    output
}

/// Alerts followed by recommendations
pub fn format_budget_insights(insights: &BudgetInsights) -> String {
    let mut output = String::new();

    if !insights.alerts.is_empty() {
        output.push_str("Alerts:\n");
        for alert in &insights.alerts {
            output.push_str(&format!("  [{}] {}\n", alert.severity, alert.message));
        }
    }

    if !insights.recommendations.is_empty() {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str("Recommendations:\n");
        for rec in &insights.recommendations {
            let marker = match rec.kind {
                RecommendationKind::Success => "✓",
                RecommendationKind::Warning => "!",
                RecommendationKind::Error => "✗",
            };
            output.push_str(&format!("  {} {}\n", marker, rec.message));
            output.push_str(&format!("    → {}\n", rec.action));
        }
    }

    output
}

/// Amounts carried over from an existing budget
pub fn format_prefill(amounts: &BTreeMap<ExpenseCategory, Money>, settings: &Settings) -> String {
    let mut output = String::new();
    for (category, amount) in amounts.iter().filter(|(_, a)| a.is_positive()) {
        output.push_str(&format!(
            "  {:<16} {:>11}\n",
            category.label(),
            settings.format_money(*amount)
        ));
    }
    output
}

pub fn format_suggestions(suggestions: &[BudgetSuggestion], settings: &Settings) -> String {
    if suggestions.is_empty() {
        return "No recent spending to base suggestions on.".to_string();
    }

    let mut output = format!("{:<16} {:>11} {:>11}\n", "Category", "Average", "Suggested");
    for s in suggestions {
        output.push_str(&format!(
            "{:<16} {:>11} {:>11}\n",
            s.category.label(),
            settings.format_money(s.average),
            settings.format_money(s.suggested),
        ));
    }
    output
}
