//! Conscious spending plan display formatting

use crate::config::settings::Settings;
use crate::reports::spending_plan::{PlanComparison, Priority};
use crate::reports::SpendingPlan;

use super::report::{double_separator, separator};

pub fn format_spending_plan(plan: &SpendingPlan, settings: &Settings) -> String {
    let money = |m| settings.format_money(m);
    let mut output = format!(
        "Conscious Spending Plan for {} / month\n{}\n",
        money(plan.income),
        double_separator(60)
    );

    for a in &plan.allocations {
        output.push_str(&format!(
            "{:<20} {:>4}%  {:>11}/month  {:>10}/week\n",
            a.bucket.label(),
            a.percentage,
            money(a.amount),
            money(a.weekly),
        ));
        output.push_str(&format!("  {}\n", a.bucket.description()));
    }

    if !plan.insights.is_empty() {
        output.push_str(&format!("\nInsights\n{}\n", separator(60)));
        for i in &plan.insights {
            output.push_str(&format!("{}: {}\n  → {}\n", i.title, i.message, i.action));
        }
    }

    output.push_str(&format!("\nAction items\n{}\n", separator(60)));
    for item in &plan.action_items {
        let priority = match item.priority {
            Priority::High => "HIGH",
            Priority::Medium => "MED ",
            Priority::Low => "LOW ",
        };
        output.push_str(&format!(
            "[{}] {} ({})\n       {}\n",
            priority, item.task, item.timeframe, item.description
        ));
    }

    output
}

pub fn format_plan_comparison(comparison: &PlanComparison, settings: &Settings) -> String {
    let signed = |m: crate::models::Money| {
        if m.is_positive() {
            format!("+{}", settings.format_money(m))
        } else {
            settings.format_money(m)
        }
    };

    let mut output = format!(
        "Plan vs. actual for {}\n{}\n",
        comparison.month.long_name(),
        separator(60)
    );
    output.push_str(&format!(
        "{:<20} {:>11}  {:>12}\n",
        "", "Actual", "Variance"
    ));
    output.push_str(&format!(
        "{:<20} {:>11}  {:>12}\n",
        "Income",
        settings.format_money(comparison.actual_income),
        signed(comparison.income_variance),
    ));
    output.push_str(&format!(
        "{:<20} {:>11}  {:>12}\n",
        "Fixed costs",
        settings.format_money(comparison.actual_fixed_costs),
        signed(comparison.fixed_costs_variance),
    ));
    output.push_str(&format!(
        "{:<20} {:>11}  {:>12}\n",
        "Guilt-free",
        settings.format_money(comparison.actual_guilt_free),
        signed(comparison.guilt_free_variance),
    ));

    for rec in &comparison.recommendations {
        output.push_str(&format!("\n! {}", rec));
    }

    output
}
