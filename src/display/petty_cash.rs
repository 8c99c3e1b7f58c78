//! Petty-cash display formatting

use crate::config::settings::Settings;
use crate::models::PettyCashEntry;
use crate::reports::{DailyLimitStatus, PettyCashStats};

use super::report::{format_bar, format_percentage};

/// Today's spending against the limit, with the day's entries
pub fn format_daily_status(
    status: &DailyLimitStatus,
    entries: &[&PettyCashEntry],
    settings: &Settings,
) -> String {
    let money = |m| settings.format_money(m);
    let mut output = format!(
        "{}: {} of {} ({})\n{}  {} remaining\n",
        status.date,
        money(status.spent),
        money(status.limit),
        format_percentage(status.percent_used),
        format_bar(status.percent_used, 100.0, 30),
        money(status.remaining),
    );

    if let Some(message) = status.alert_message() {
        output.push_str(&format!("\n{}\n", message));
    }

    if !entries.is_empty() {
        output.push('\n');
        for e in entries {
            output.push_str(&format!(
                "  {}  {}  {:<28} {:>9}\n",
                e.id,
                e.time,
                e.description,
                money(e.amount)
            ));
        }
    }

    output
}

pub fn format_petty_stats(stats: &PettyCashStats, settings: &Settings) -> String {
    let money = |m| settings.format_money(m);
    let mut output = format!(
        "Last {} days: {} total, {} per day, {} day(s) over limit\n",
        stats.days,
        money(stats.total),
        money(stats.daily_average),
        stats.days_over_limit,
    );

    if let Some(high) = &stats.highest_day {
        output.push_str(&format!("Highest: {} on {}\n", money(high.amount), high.date));
    }
    if let Some(low) = &stats.lowest_day {
        output.push_str(&format!("Lowest:  {} on {}\n", money(low.amount), low.date));
    }

    output.push('\n');
    for day in &stats.breakdown {
        output.push_str(&format!(
            "  {}  {:>9} {}{}\n",
            day.date,
            money(day.amount),
            format_bar(day.percent_of_limit, 100.0, 20),
            if day.over_limit { " over" } else { "" },
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::reports::compute_daily_status;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_status_includes_alert() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let entry = PettyCashEntry::new(Money::from_units(25), "Taxi", "18:40", today, Utc::now());
        let entries = vec![entry];
        let status = compute_daily_status(&entries, Money::from_units(20), today);

        let out = format_daily_status(&status, &entries.iter().collect::<Vec<_>>(), &Settings::default());
        assert!(out.contains("$25.00 of $20.00"));
        assert!(out.contains("You've exceeded your daily limit by $5.00!"));
        assert!(out.contains("Taxi"));
    }

    #[test]
    fn test_stats_breakdown() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let stats = PettyCashStats::compute(&[], Money::from_units(20), today, 3);
        let out = format_petty_stats(&stats, &Settings::default());
        assert!(out.starts_with("Last 3 days: $0.00 total"));
        assert!(!out.contains("Highest"));
        assert_eq!(out.matches("2025-").count(), 3);
    }
}
