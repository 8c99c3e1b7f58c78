//! Goal timelines, statistics and insights

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Goal, GoalCategory, GoalId, Money};

/// Number of most recent contributions averaged for the projection
pub const CONTRIBUTION_WINDOW: usize = 6;

/// Share of the required monthly amount that still counts as on track
pub const ON_TRACK_RATIO: f64 = 0.8;

/// Goals due within this many days are flagged as urgent
pub const URGENT_DAYS: i64 = 30;

/// Projection for a goal that is neither complete nor overdue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProjection {
    pub days_left: i64,
    pub months_left: i64,
    pub remaining: Money,
    pub required_monthly: Money,
    pub average_contribution: Money,
    pub on_track: bool,
    /// Months to finish at the average contribution; `None` without contributions
    pub estimated_months: Option<i64>,
}

/// Where a goal stands relative to its deadline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GoalTimeline {
    Completed,
    Overdue { days: i64 },
    InProgress(GoalProjection),
}

impl GoalTimeline {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, Self::Overdue { .. })
    }

    pub fn projection(&self) -> Option<&GoalProjection> {
        match self {
            Self::InProgress(p) => Some(p),
            _ => None,
        }
    }
}

/// Work out a goal's timeline as of `today`
pub fn compute_goal_timeline(goal: &Goal, today: NaiveDate) -> GoalTimeline {
    if goal.is_completed() {
        return GoalTimeline::Completed;
    }

    let days_left = (goal.deadline - today).num_days();
    if days_left <= 0 {
        return GoalTimeline::Overdue {
            days: days_left.abs(),
        };
    }

    let remaining = goal.target - goal.current;
    let months_left = ((days_left + 29) / 30).max(1);
    let required_exact = remaining.cents() as f64 / months_left as f64;

    let recent: Vec<Money> = {
        let all: Vec<Money> = goal.contributions().map(|h| h.difference).collect();
        let start = all.len().saturating_sub(CONTRIBUTION_WINDOW);
        all[start..].to_vec()
    };
    let average_exact = if recent.is_empty() {
        0.0
    } else {
        recent.iter().sum::<Money>().cents() as f64 / recent.len() as f64
    };

    let estimated_months = if average_exact > 0.0 {
        Some((remaining.cents() as f64 / average_exact).ceil() as i64)
    } else {
        None
    };

    GoalTimeline::InProgress(GoalProjection {
        days_left,
        months_left,
        remaining,
        required_monthly: remaining.split(months_left),
        average_contribution: Money::from_cents(average_exact.round() as i64),
        on_track: average_exact >= ON_TRACK_RATIO * required_exact,
        estimated_months,
    })
}

/// Totals for one goal category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalCategoryStats {
    pub category: GoalCategory,
    pub count: usize,
    pub total_target: Money,
    pub total_current: Money,
    pub completed: usize,
}

/// Portfolio-wide goal statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub overdue: usize,
    pub total_target: Money,
    pub total_current: Money,
    /// One entry per goal category, in canonical order
    pub by_category: Vec<GoalCategoryStats>,
    pub completion_rate: f64,
    pub overall_progress: f64,
}

impl GoalStats {
    pub fn compute(goals: &[Goal], today: NaiveDate) -> Self {
        let total = goals.len();
        let completed = goals.iter().filter(|g| g.is_completed()).count();
        let total_target: Money = goals.iter().map(|g| g.target).sum();
        let total_current: Money = goals.iter().map(|g| g.current).sum();

        let by_category = GoalCategory::ALL
            .iter()
            .map(|&category| {
                let in_category = || goals.iter().filter(move |g| g.category == category);
                GoalCategoryStats {
                    category,
                    count: in_category().count(),
                    total_target: in_category().map(|g| g.target).sum(),
                    total_current: in_category().map(|g| g.current).sum(),
                    completed: in_category().filter(|g| g.is_completed()).count(),
                }
            })
            .collect();

        let completion_rate = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total,
            completed,
            in_progress: goals
                .iter()
                .filter(|g| g.is_started() && !g.is_completed())
                .count(),
            not_started: goals.iter().filter(|g| g.current.is_zero()).count(),
            overdue: goals
                .iter()
                .filter(|g| compute_goal_timeline(g, today).is_overdue())
                .count(),
            total_target,
            total_current,
            by_category,
            completion_rate,
            overall_progress: total_current.percent_of(total_target),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalInsightKind {
    Completed,
    Overdue,
    Urgent,
    Behind,
    OnTrack,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalInsight {
    #[serde(rename = "type")]
    pub kind: GoalInsightKind,
    pub goal_id: GoalId,
    pub goal_name: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GoalInsights {
    pub achievements: Vec<GoalInsight>,
    pub alerts: Vec<GoalInsight>,
    pub recommendations: Vec<GoalInsight>,
}

impl GoalInsights {
    pub fn is_empty(&self) -> bool {
        self.achievements.is_empty() && self.alerts.is_empty() && self.recommendations.is_empty()
    }
}

/// Sort every goal into achievements, alerts or recommendations
pub fn compute_goal_insights(goals: &[Goal], today: NaiveDate) -> GoalInsights {
    let mut insights = GoalInsights::default();

    for goal in goals {
        let insight = |kind, message: String, action: Option<String>| GoalInsight {
            kind,
            goal_id: goal.id,
            goal_name: goal.name.clone(),
            message,
            action,
        };

        match compute_goal_timeline(goal, today) {
            GoalTimeline::Completed => insights.achievements.push(insight(
                GoalInsightKind::Completed,
                format!("Goal \"{}\" has been completed!", goal.name),
                None,
            )),
            GoalTimeline::Overdue { days } => insights.alerts.push(insight(
                GoalInsightKind::Overdue,
                format!("Goal \"{}\" is {} days overdue", goal.name, days),
                Some("Consider adjusting the target date or increasing contributions".into()),
            )),
            GoalTimeline::InProgress(p) if p.days_left <= URGENT_DAYS => {
                insights.alerts.push(insight(
                    GoalInsightKind::Urgent,
                    format!("Goal \"{}\" deadline is in {} days", goal.name, p.days_left),
                    Some(format!("Need {} monthly to achieve", p.required_monthly)),
                ))
            }
            GoalTimeline::InProgress(p) if !p.on_track => insights.recommendations.push(insight(
                GoalInsightKind::Behind,
                format!("You're behind on \"{}\"", goal.name),
                Some(format!(
                    "Increase monthly contribution to {}",
                    p.required_monthly
                )),
            )),
            GoalTimeline::InProgress(_) => insights.recommendations.push(insight(
                GoalInsightKind::OnTrack,
                format!("Great progress on \"{}\"!", goal.name),
                Some("Keep up the current pace".into()),
            )),
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        now().date_naive()
    }

    fn goal(target: i64, current: i64, days_until_deadline: i64) -> Goal {
        Goal::new(
            "Trip",
            Money::from_units(target),
            Money::from_units(current),
            today() + Duration::days(days_until_deadline),
            GoalCategory::Vacation,
            now(),
        )
    }

    #[test]
    fn test_completed_goal() {
        let g = goal(1000, 1000, 60);
        assert_eq!(compute_goal_timeline(&g, today()), GoalTimeline::Completed);
    }

    #[test]
    fn test_completed_wins_over_overdue() {
        let g = goal(1000, 1200, -5);
        assert!(compute_goal_timeline(&g, today()).is_completed());
    }

    #[test]
    fn test_overdue_goal() {
        let g = goal(1000, 200, -10);
        assert_eq!(
            compute_goal_timeline(&g, today()),
            GoalTimeline::Overdue { days: 10 }
        );
    }

    #[test]
    fn test_deadline_today_is_overdue_by_zero() {
        let g = goal(1000, 200, 0);
        assert_eq!(
            compute_goal_timeline(&g, today()),
            GoalTimeline::Overdue { days: 0 }
        );
    }

    #[test]
    fn test_projection_without_contributions() {
        let g = goal(1200, 0, 90);
        let timeline = compute_goal_timeline(&g, today());
        let p = timeline.projection().unwrap();

        assert_eq!(p.days_left, 90);
        assert_eq!(p.months_left, 3);
        assert_eq!(p.remaining, Money::from_units(1200));
        assert_eq!(p.required_monthly, Money::from_units(400));
        assert_eq!(p.average_contribution, Money::zero());
        assert!(!p.on_track);
        assert_eq!(p.estimated_months, None);
    }

    #[test]
    fn test_months_left_rounds_up_and_floors_at_one() {
        let p = compute_goal_timeline(&goal(1000, 0, 31), today());
        assert_eq!(p.projection().unwrap().months_left, 2);

        let p = compute_goal_timeline(&goal(1000, 0, 5), today());
        assert_eq!(p.projection().unwrap().months_left, 1);
    }

    #[test]
    fn test_average_uses_last_six_contributions() {
        let mut g = goal(10_000, 0, 300);
        // Eight contributions: 100, then seven of 400, with a withdrawal in between
        let mut amount = 0;
        for step in [100, 400, 400, 400, 400, 400, 400, 400] {
            amount += step;
            g.apply_progress(Money::from_units(amount), None, now()).unwrap();
        }
        g.apply_progress(Money::from_units(amount - 50), None, now()).unwrap();

        let timeline = compute_goal_timeline(&g, today());
        let p = timeline.projection().unwrap();
        assert_eq!(p.average_contribution, Money::from_units(400));
        // remaining 10000 - 2850 = 7150, 10 months left -> 715 required
        assert_eq!(p.required_monthly, Money::from_units(715));
        // 400 < 0.8 * 715 = 572
        assert!(!p.on_track);
        assert_eq!(p.estimated_months, Some(18));
    }

    #[test]
    fn test_on_track_at_eighty_percent() {
        let mut g = goal(1000, 0, 60);
        // remaining after contribution: 1000 - 400 = 600 over 2 months -> 300/month
        g.apply_progress(Money::from_units(400), None, now()).unwrap();
        // average 400 >= 240
        assert!(compute_goal_timeline(&g, today()).projection().unwrap().on_track);
    }

    #[test]
    fn test_stats() {
        let goals = vec![
            goal(1000, 1000, 30),
            goal(1000, 500, 30),
            goal(2000, 0, -3),
        ];
        let stats = GoalStats::compute(&goals, today());

        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.not_started, 1);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.total_target, Money::from_units(4000));
        assert_eq!(stats.total_current, Money::from_units(1500));
        assert!((stats.completion_rate - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.overall_progress, 37.5);

        let vacation = stats
            .by_category
            .iter()
            .find(|c| c.category == GoalCategory::Vacation)
            .unwrap();
        assert_eq!(vacation.count, 3);
        assert_eq!(vacation.completed, 1);
        assert_eq!(stats.by_category.len(), GoalCategory::ALL.len());
    }

    #[test]
    fn test_stats_empty() {
        let stats = GoalStats::compute(&[], today());
        assert_eq!(stats.completion_rate, 0.0);
        assert_eq!(stats.overall_progress, 0.0);
    }

    #[test]
    fn test_insights_sorting() {
        let mut on_track = goal(1000, 0, 60);
        on_track.apply_progress(Money::from_units(400), None, now()).unwrap();

        let goals = vec![
            goal(1000, 1000, 60),
            goal(1000, 200, -10),
            goal(1000, 200, 20),
            goal(1000, 0, 200),
            on_track,
        ];
        let insights = compute_goal_insights(&goals, today());

        assert_eq!(insights.achievements.len(), 1);
        assert_eq!(insights.alerts.len(), 2);
        assert_eq!(insights.alerts[0].kind, GoalInsightKind::Overdue);
        assert_eq!(insights.alerts[0].message, "Goal \"Trip\" is 10 days overdue");
        assert_eq!(insights.alerts[1].kind, GoalInsightKind::Urgent);
        assert_eq!(insights.recommendations.len(), 2);
        assert_eq!(insights.recommendations[0].kind, GoalInsightKind::Behind);
        assert_eq!(insights.recommendations[1].kind, GoalInsightKind::OnTrack);
    }

    #[test]
    fn test_timeline_serializes_with_state_tag() {
        let json = serde_json::to_value(GoalTimeline::Overdue { days: 4 }).unwrap();
        assert_eq!(json["state"], "overdue");
        assert_eq!(json["days"], 4);
    }
}
