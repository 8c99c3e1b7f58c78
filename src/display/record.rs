//! Expense and income display formatting

use crate::config::settings::Settings;
use crate::models::{Expense, Income};
use crate::reports::income::{IncomeStats, MonthlyIncome};
use crate::reports::{CategoryShare, ExpenseStats};

use super::report::{format_bar, format_percentage, truncate};

/// Format a list of expenses as a table
pub fn format_expense_list(expenses: &[&Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let mut output = format!(
        "{:<12}  {:<10}  {:<14}  {:<28}  {:>11}\n",
        "ID", "Date", "Category", "Description", "Amount"
    );
    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<14}  {:-<28}  {:->11}\n",
        "", "", "", "", ""
    ));

    for e in expenses {
        output.push_str(&format!(
            "{:<12}  {:<10}  {:<14}  {:<28}  {:>11}\n",
            e.id.to_string(),
            e.date.format(&settings.date_format).to_string(),
            e.category.label(),
            truncate(&e.description, 28),
            settings.format_money(e.amount),
        ));
    }

    let total = expenses.iter().map(|e| e.amount).sum();
    output.push_str(&format!(
        "\n{} expense(s), total {}",
        expenses.len(),
        settings.format_money(total)
    ));
    output
}

/// Format a list of income entries as a table
pub fn format_income_list(income: &[&Income], settings: &Settings) -> String {
    if income.is_empty() {
        return "No income found.".to_string();
    }

    let mut output = format!(
        "{:<12}  {:<10}  {:<11}  {:<32}  {:>11}\n",
        "ID", "Date", "Source", "Description", "Amount"
    );
    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<11}  {:-<32}  {:->11}\n",
        "", "", "", "", ""
    ));

    for i in income {
        let marker = if i.recurring_info.is_some() { " ↻" } else { "" };
        output.push_str(&format!(
            "{:<12}  {:<10}  {:<11}  {:<32}  {:>11}{}\n",
            i.id.to_string(),
            i.date.format(&settings.date_format).to_string(),
            i.source.label(),
            truncate(&i.description, 32),
            settings.format_money(i.amount),
            marker,
        ));
    }

    let total = income.iter().map(|i| i.amount).sum();
    output.push_str(&format!(
        "\n{} entr{}, total {}",
        income.len(),
        if income.len() == 1 { "y" } else { "ies" },
        settings.format_money(total)
    ));
    output
}

pub fn format_top_categories(shares: &[CategoryShare], settings: &Settings) -> String {
    if shares.is_empty() {
        return "No spending recorded.".to_string();
    }

    let mut output = String::new();
    for (rank, share) in shares.iter().enumerate() {
        output.push_str(&format!(
            "{}. {:<16} {:>11} {:>6} {}\n",
            rank + 1,
            share.category.label(),
            settings.format_money(share.amount),
            format_percentage(share.percentage),
            format_bar(share.percentage, 100.0, 20),
        ));
    }
    output
}

/// Expense totals with a per-category breakdown
pub fn format_expense_stats(stats: &ExpenseStats, settings: &Settings) -> String {
    let money = |m| settings.format_money(m);
    let mut output = format!(
        "This month: {}\nLast month: {}\nAll time:   {}\n",
        money(stats.current_month),
        money(stats.last_month),
        money(stats.total)
    );

    let used: Vec<_> = stats.by_category.iter().filter(|c| c.count > 0).collect();
    if !used.is_empty() {
        output.push_str(&format!(
            "\n{:<16} {:>11} {:>11} {:>6}\n",
            "Category", "This month", "All time", "Count"
        ));
        for c in used {
            output.push_str(&format!(
                "{:<16} {:>11} {:>11} {:>6}\n",
                c.category.label(),
                money(c.current_month),
                money(c.total),
                c.count
            ));
        }
    }
    output
}

/// Income statistics followed by month-by-month trends
pub fn format_income_summary(
    stats: &IncomeStats,
    trends: &[MonthlyIncome],
    settings: &Settings,
) -> String {
    let money = |m| settings.format_money(m);
    let mut output = String::new();

    output.push_str(&format!("This month:      {}\n", money(stats.current_month)));
    output.push_str(&format!("Last month:      {}\n", money(stats.last_month)));
    output.push_str(&format!("Monthly average: {}\n", money(stats.average_monthly)));
    output.push_str(&format!("All time:        {}\n", money(stats.total)));
    output.push_str(&format!("Recurring:       {}\n", stats.recurring_count));

    let peak = trends.iter().map(|t| t.total.as_units_f64()).fold(0.0, f64::max);
    output.push_str("\nTrend:\n");
    for t in trends {
        output.push_str(&format!(
            "  {}  {:>11} {}\n",
            t.month,
            money(t.total),
            format_bar(t.total.as_units_f64(), peak, 24),
        ));
    }

    let sources: Vec<_> = stats.by_source.iter().filter(|s| s.total.is_positive()).collect();
    if !sources.is_empty() {
        output.push_str("\nBy source:\n");
        for s in sources {
            output.push_str(&format!(
                "  {:<11} {:>11} ({} entr{})\n",
                s.source.label(),
                money(s.total),
                s.count,
                if s.count == 1 { "y" } else { "ies" }
            ));
        }
    }

    output
}
