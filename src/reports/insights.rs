//! Budget insights: summary, recommendations and alerts
//!
//! Derived from a [`BudgetComparison`] alone, so the same comparison always
//! yields the same insights.

use serde::Serialize;
use std::fmt;

use super::budget_comparison::{BudgetComparison, BudgetStatus};
use crate::models::{ExpenseCategory, Money, MonthKey};

/// Percent spent above which an in-budget category gets a "close to limit"
/// recommendation
pub const CLOSE_TO_LIMIT_PERCENT: f64 = 80.0;

/// Percent spent at which a category raises an alert
pub const ALERT_PERCENT: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Success,
    Warning,
    Error,
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Advice derived from the comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    /// `None` for advice about the month as a whole
    pub category: Option<ExpenseCategory>,
    pub message: String,
    pub action: String,
}

impl Recommendation {
    pub fn is_overall(&self) -> bool {
        self.category.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// A category that has used most or all of its budget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetAlert {
    pub severity: AlertSeverity,
    pub category: ExpenseCategory,
    pub message: String,
    pub remaining: Money,
}

/// Month-level figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub month: MonthKey,
    pub total_budget: Money,
    pub total_spent: Money,
    pub remaining: Money,
    pub percent_spent: f64,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetInsights {
    pub summary: BudgetSummary,
    pub recommendations: Vec<Recommendation>,
    pub alerts: Vec<BudgetAlert>,
}

impl BudgetInsights {
    pub fn critical_alerts(&self) -> impl Iterator<Item = &BudgetAlert> {
        self.alerts
            .iter()
            .filter(|a| a.severity == AlertSeverity::Critical)
    }
}

fn summarize(comparison: &BudgetComparison) -> BudgetSummary {
    let totals = &comparison.totals;
    BudgetSummary {
        month: comparison.month,
        total_budget: totals.budgeted,
        total_spent: totals.spent,
        remaining: totals.remaining,
        percent_spent: totals.percent_spent,
        status: totals.status,
    }
}

fn recommend(comparison: &BudgetComparison) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let total_percent = comparison.totals.percent_spent;

    if total_percent > 100.0 {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Warning,
            category: None,
            message: "You've exceeded your total budget. Consider reviewing your spending habits."
                .to_string(),
            action: "Review expenses and identify areas to cut back.".to_string(),
        });
    } else if total_percent < 50.0 {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Success,
            category: None,
            message: "Great job staying within budget! Consider saving the extra money."
                .to_string(),
            action: "Move surplus to savings or emergency fund.".to_string(),
        });
    }

    for row in &comparison.categories {
        if row.is_over_budget {
            recommendations.push(Recommendation {
                kind: RecommendationKind::Error,
                category: Some(row.category),
                message: format!(
                    "You're over budget in {} by {}.",
                    row.category.label(),
                    row.overage()
                ),
                action: "Reduce spending in this category or adjust budget allocation."
                    .to_string(),
            });
        } else if row.percent_spent > CLOSE_TO_LIMIT_PERCENT {
            recommendations.push(Recommendation {
                kind: RecommendationKind::Warning,
                category: Some(row.category),
                message: format!(
                    "You're close to your {} budget limit.",
                    row.category.label()
                ),
                action: "Monitor spending carefully for the rest of the month.".to_string(),
            });
        }
    }

    recommendations
}

fn alert(comparison: &BudgetComparison) -> Vec<BudgetAlert> {
    comparison
        .categories
        .iter()
        .filter(|row| row.percent_spent >= ALERT_PERCENT)
        .map(|row| BudgetAlert {
            severity: if row.is_over_budget {
                AlertSeverity::Critical
            } else {
                AlertSeverity::Warning
            },
            category: row.category,
            message: format!(
                "{}: {}% of budget used",
                row.category.label(),
                row.percent_spent.round()
            ),
            remaining: row.remaining,
        })
        .collect()
}

/// Derive the summary, recommendations and alerts for a comparison
pub fn compute_insights(comparison: &BudgetComparison) -> BudgetInsights {
    let insights = BudgetInsights {
        summary: summarize(comparison),
        recommendations: recommend(comparison),
        alerts: alert(comparison),
    };

    for a in insights.critical_alerts() {
        tracing::warn!(month = %comparison.month, category = a.category.as_str(), "{}", a.message);
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Expense};
    use crate::reports::budget_comparison::compute_budget_comparison;
    use chrono::{NaiveDate, Utc};
    use std::collections::BTreeMap;

    fn month() -> MonthKey {
        MonthKey::new(2025, 1).unwrap()
    }

    fn comparison(
        budget: &[(ExpenseCategory, i64)],
        spent: &[(ExpenseCategory, i64)],
    ) -> BudgetComparison {
        let budget = Budget::with_amounts(
            month(),
            budget.iter().map(|&(c, u)| (c, Money::from_units(u))),
            Utc::now(),
        );
        let records: Vec<Expense> = spent
            .iter()
            .map(|&(c, u)| {
                Expense::new(
                    Money::from_units(u),
                    c,
                    "test",
                    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
                    Utc::now(),
                )
            })
            .collect();
        compute_budget_comparison(&records, &BTreeMap::from([(month(), budget)]), month()).unwrap()
    }

    #[test]
    fn test_seventy_percent_has_no_category_advice() {
        let c = comparison(
            &[(ExpenseCategory::Food, 300)],
            &[(ExpenseCategory::Food, 120), (ExpenseCategory::Food, 90)],
        );
        let insights = compute_insights(&c);

        assert!(insights.recommendations.iter().all(|r| r.is_overall()));
        assert!(insights.alerts.is_empty());
        assert_eq!(insights.summary.status, BudgetStatus::Warning);
        assert_eq!(insights.summary.total_spent, Money::from_units(210));
    }

    #[test]
    fn test_over_budget_category() {
        let c = comparison(&[(ExpenseCategory::Food, 100)], &[(ExpenseCategory::Food, 150)]);
        let insights = compute_insights(&c);

        let category_recs: Vec<_> = insights
            .recommendations
            .iter()
            .filter(|r| !r.is_overall())
            .collect();
        assert_eq!(category_recs.len(), 1);
        assert_eq!(category_recs[0].kind, RecommendationKind::Error);
        assert_eq!(category_recs[0].category, Some(ExpenseCategory::Food));
        assert!(category_recs[0].message.contains("$50.00"));

        assert_eq!(insights.alerts.len(), 1);
        assert_eq!(insights.alerts[0].severity, AlertSeverity::Critical);
        assert_eq!(insights.alerts[0].message, "Food: 150% of budget used");
        assert_eq!(insights.alerts[0].remaining, Money::from_units(-50));
    }

    #[test]
    fn test_overall_warning_comes_first() {
        let c = comparison(
            &[(ExpenseCategory::Food, 100), (ExpenseCategory::Bills, 100)],
            &[(ExpenseCategory::Food, 150), (ExpenseCategory::Bills, 95)],
        );
        let insights = compute_insights(&c);

        let first = &insights.recommendations[0];
        assert!(first.is_overall());
        assert_eq!(first.kind, RecommendationKind::Warning);

        // Categories follow in enumeration order: food before bills
        assert_eq!(insights.recommendations[1].category, Some(ExpenseCategory::Food));
        assert_eq!(insights.recommendations[1].kind, RecommendationKind::Error);
        assert_eq!(insights.recommendations[2].category, Some(ExpenseCategory::Bills));
        assert_eq!(insights.recommendations[2].kind, RecommendationKind::Warning);
    }

    #[test]
    fn test_low_spending_gets_success() {
        let c = comparison(&[(ExpenseCategory::Food, 1000)], &[(ExpenseCategory::Food, 100)]);
        let insights = compute_insights(&c);

        assert_eq!(insights.recommendations.len(), 1);
        assert_eq!(insights.recommendations[0].kind, RecommendationKind::Success);
    }

    #[test]
    fn test_between_fifty_and_hundred_has_no_overall_advice() {
        let c = comparison(&[(ExpenseCategory::Food, 100)], &[(ExpenseCategory::Food, 60)]);
        assert!(compute_insights(&c).recommendations.is_empty());
    }

    #[test]
    fn test_warning_alert_at_ninety() {
        let c = comparison(&[(ExpenseCategory::Transportation, 100)], &[(ExpenseCategory::Transportation, 90)]);
        let insights = compute_insights(&c);

        assert_eq!(insights.alerts.len(), 1);
        assert_eq!(insights.alerts[0].severity, AlertSeverity::Warning);
        assert_eq!(insights.alerts[0].message, "Transportation: 90% of budget used");
        assert_eq!(insights.critical_alerts().count(), 0);
    }

    #[test]
    fn test_unbudgeted_spending_is_error_without_alert() {
        let c = comparison(
            &[(ExpenseCategory::Food, 1000)],
            &[(ExpenseCategory::Shopping, 40)],
        );
        let insights = compute_insights(&c);

        assert!(insights
            .recommendations
            .iter()
            .any(|r| r.category == Some(ExpenseCategory::Shopping) && r.kind == RecommendationKind::Error));
        assert!(insights.alerts.is_empty());
    }

    #[test]
    fn test_serialized_recommendation_uses_type_key() {
        let c = comparison(&[(ExpenseCategory::Food, 100)], &[(ExpenseCategory::Food, 150)]);
        let json = serde_json::to_value(compute_insights(&c)).unwrap();
        assert_eq!(json["recommendations"][0]["type"], "error");
        assert_eq!(json["alerts"][0]["severity"], "critical");
    }
}
