//! Goal display formatting

use chrono::NaiveDate;

use crate::config::settings::Settings;
use crate::models::Goal;
use crate::reports::{compute_goal_timeline, GoalInsight, GoalInsights, GoalStats, GoalTimeline};

use super::report::{format_bar, format_percentage, separator};

/// One block per goal: progress bar plus where it stands against its deadline
pub fn format_goal_list(goals: &[Goal], today: NaiveDate, settings: &Settings) -> String {
    if goals.is_empty() {
        return "No goals yet. Add one with 'finfree goal add'.".to_string();
    }

    let money = |m| settings.format_money(m);
    let mut output = String::new();

    for goal in goals {
        output.push_str(&format!(
            "{}  {} [{}]\n",
            goal.id,
            goal.name,
            goal.category.label()
        ));
        output.push_str(&format!(
            "  {} {} / {} ({})\n",
            format_bar(goal.progress_percent(), 100.0, 20),
            money(goal.current),
            money(goal.target),
            format_percentage(goal.progress_percent()),
        ));

        let status = match compute_goal_timeline(goal, today) {
            GoalTimeline::Completed => "Completed".to_string(),
            GoalTimeline::Overdue { days } => {
                format!("Overdue by {} days (due {})", days, goal.deadline)
            }
            GoalTimeline::InProgress(p) => {
                let mut line = format!(
                    "{} days left, need {}/month",
                    p.days_left,
                    money(p.required_monthly)
                );
                if let Some(months) = p.estimated_months {
                    line.push_str(&format!(
                        ", ~{} months at {}/contribution",
                        months,
                        money(p.average_contribution)
                    ));
                }
                line.push_str(if p.on_track { " (on track)" } else { " (behind)" });
                line
            }
        };
        output.push_str(&format!("  {}\n\n", status));
    }

    output.trim_end().to_string()
}

pub fn format_goal_stats(stats: &GoalStats, settings: &Settings) -> String {
    let money = |m| settings.format_money(m);
    let mut output = String::new();

    output.push_str(&format!(
        "Goals: {} total, {} completed, {} in progress, {} not started, {} overdue\n",
        stats.total, stats.completed, stats.in_progress, stats.not_started, stats.overdue
    ));
    output.push_str(&format!(
        "Saved {} of {} ({} overall, {} completion rate)\n",
        money(stats.total_current),
        money(stats.total_target),
        format_percentage(stats.overall_progress),
        format_percentage(stats.completion_rate),
    ));

    let categories: Vec<_> = stats.by_category.iter().filter(|c| c.count > 0).collect();
    if !categories.is_empty() {
        output.push_str(&separator(56));
        output.push('\n');
        for c in categories {
            output.push_str(&format!(
                "{:<16} {:>2} goal(s) {:>11} / {:>11}\n",
                c.category.label(),
                c.count,
                money(c.total_current),
                money(c.total_target),
            ));
        }
    }

    output
}

fn push_section(output: &mut String, title: &str, items: &[GoalInsight]) {
    if items.is_empty() {
        return;
    }
    output.push_str(title);
    output.push('\n');
    for item in items {
        output.push_str(&format!("  {}\n", item.message));
        if let Some(action) = &item.action {
            output.push_str(&format!("    → {}\n", action));
        }
    }
}

pub fn format_goal_insights(insights: &GoalInsights) -> String {
    let mut output = String::new();
    push_section(&mut output, "Achievements:", &insights.achievements);
    push_section(&mut output, "Alerts:", &insights.alerts);
    push_section(&mut output, "Recommendations:", &insights.recommendations);
    output
}
