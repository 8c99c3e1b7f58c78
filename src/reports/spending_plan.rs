//! Conscious spending plan
//!
//! Splits monthly take-home income into fixed costs, investments, savings
//! and guilt-free spending, and compares a month's actual spending with the
//! plan.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{FinFreeError, FinFreeResult};
use crate::models::{Expense, ExpenseCategory, Income, Money, MonthKey};

use super::income::monthly_income;
use super::spending::expenses_in_month;

/// Average number of weeks in a month
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Expense categories counted as fixed costs
pub const FIXED_COST_CATEGORIES: &[ExpenseCategory] = &[
    ExpenseCategory::Bills,
    ExpenseCategory::Healthcare,
    ExpenseCategory::Transportation,
];

/// Expense categories counted as guilt-free spending. Education is in
/// neither group.
pub const GUILT_FREE_CATEGORIES: &[ExpenseCategory] = &[
    ExpenseCategory::Food,
    ExpenseCategory::Entertainment,
    ExpenseCategory::Shopping,
    ExpenseCategory::Other,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    FixedCosts,
    Investments,
    Savings,
    GuiltFree,
}

impl Bucket {
    pub const ALL: &'static [Bucket] = &[
        Self::FixedCosts,
        Self::Investments,
        Self::Savings,
        Self::GuiltFree,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FixedCosts => "Fixed Costs",
            Self::Investments => "Investments",
            Self::Savings => "Savings",
            Self::GuiltFree => "Guilt-Free Spending",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::FixedCosts => "Rent/mortgage, utilities, insurance, minimum debt payments",
            Self::Investments => "401k, Roth IRA, investment accounts",
            Self::Savings => "Emergency fund, vacation fund, wedding, etc.",
            Self::GuiltFree => "Dining out, movies, clothes, hobbies",
        }
    }

    pub fn tips(&self) -> &'static [&'static str] {
        match self {
            Self::FixedCosts => &[
                "Negotiate rent or refinance mortgage if possible",
                "Shop around for insurance annually",
                "Consider bundling services for discounts",
                "Pay minimums on debt, extra goes to guilt-free spending",
            ],
            Self::Investments => &[
                "Automate investments first - pay yourself first",
                "Maximize employer 401k match",
                "Consider low-cost index funds",
                "Increase by 1% annually or with raises",
            ],
            Self::Savings => &[
                "Build emergency fund to 3-6 months of expenses",
                "Separate savings for different goals",
                "Use high-yield savings accounts",
                "Automate transfers after payday",
            ],
            Self::GuiltFree => &[
                "Spend extravagantly on things you love",
                "Cut costs mercilessly on things you don't",
                "No guilt when spending within this budget",
                "Track to ensure you don't overspend",
            ],
        }
    }
}

/// Percent of income assigned to each bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AllocationPercentages {
    pub fixed_costs: f64,
    pub investments: f64,
    pub savings: f64,
    pub guilt_free: f64,
}

impl Default for AllocationPercentages {
    fn default() -> Self {
        Self {
            fixed_costs: 60.0,
            investments: 10.0,
            savings: 5.0,
            guilt_free: 25.0,
        }
    }
}

impl AllocationPercentages {
    pub fn for_bucket(&self, bucket: Bucket) -> f64 {
        match bucket {
            Bucket::FixedCosts => self.fixed_costs,
            Bucket::Investments => self.investments,
            Bucket::Savings => self.savings,
            Bucket::GuiltFree => self.guilt_free,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    pub bucket: Bucket,
    pub percentage: f64,
    pub amount: Money,
    pub weekly: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanInsightKind {
    Focus,
    Optimize,
    Warning,
    Opportunity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanInsight {
    #[serde(rename = "type")]
    pub kind: PlanInsightKind,
    pub title: String,
    pub message: String,
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionItem {
    pub priority: Priority,
    pub task: String,
    pub description: String,
    pub timeframe: String,
}

impl ActionItem {
    fn new(priority: Priority, task: &str, description: &str, timeframe: &str) -> Self {
        Self {
            priority,
            task: task.to_string(),
            description: description.to_string(),
            timeframe: timeframe.to_string(),
        }
    }
}

/// A full conscious spending plan for one monthly income
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingPlan {
    pub income: Money,
    pub generated_at: DateTime<Utc>,
    pub allocations: Vec<Allocation>,
    pub insights: Vec<PlanInsight>,
    pub action_items: Vec<ActionItem>,
}

impl SpendingPlan {
    /// Build a plan with the default 60/10/5/25 split
    pub fn generate(income: Money, now: DateTime<Utc>) -> FinFreeResult<Self> {
        Self::with_percentages(income, AllocationPercentages::default(), now)
    }

    pub fn with_percentages(
        income: Money,
        percentages: AllocationPercentages,
        now: DateTime<Utc>,
    ) -> FinFreeResult<Self> {
        if !income.is_positive() {
            return Err(FinFreeError::Validation(
                "Please enter your monthly take-home income".into(),
            ));
        }

        let allocations: Vec<Allocation> = Bucket::ALL
            .iter()
            .map(|&bucket| {
                let percentage = percentages.for_bucket(bucket);
                let amount = income.scale(percentage / 100.0);
                Allocation {
                    bucket,
                    percentage,
                    amount,
                    weekly: amount.scale(1.0 / WEEKS_PER_MONTH),
                }
            })
            .collect();

        let mut plan = Self {
            income,
            generated_at: now,
            allocations,
            insights: Vec::new(),
            action_items: action_items(income),
        };
        plan.insights = plan_insights(&plan);
        Ok(plan)
    }

    pub fn allocation(&self, bucket: Bucket) -> Money {
        self.allocations
            .iter()
            .find(|a| a.bucket == bucket)
            .map(|a| a.amount)
            .unwrap_or_default()
    }
}

fn plan_insights(plan: &SpendingPlan) -> Vec<PlanInsight> {
    let income = plan.income;
    let mut insights = Vec::new();

    if income < Money::from_units(3000) {
        insights.push(PlanInsight {
            kind: PlanInsightKind::Focus,
            title: "Focus on Income Growth".into(),
            message: "At your current income level, prioritize increasing your earning potential through skills development or side hustles.".into(),
            action: "Consider online courses, certifications, or freelancing opportunities".into(),
        });
    } else if income > Money::from_units(8000) {
        insights.push(PlanInsight {
            kind: PlanInsightKind::Optimize,
            title: "Optimization Opportunity".into(),
            message: "You have room to increase your investment percentage for accelerated wealth building.".into(),
            action: "Consider increasing investments to 15-20% of income".into(),
        });
    }

    if plan.allocation(Bucket::FixedCosts) > income.scale(0.7) {
        insights.push(PlanInsight {
            kind: PlanInsightKind::Warning,
            title: "High Fixed Costs".into(),
            message: "Your fixed costs are quite high. Look for opportunities to reduce them.".into(),
            action: "Review housing, transportation, and subscription costs".into(),
        });
    }

    if plan.allocation(Bucket::GuiltFree) > Money::from_units(500) {
        insights.push(PlanInsight {
            kind: PlanInsightKind::Opportunity,
            title: "Rich Life Opportunity".into(),
            message: "You have significant guilt-free spending available. Make sure you're using it on things you truly love.".into(),
            action: "Define what your \"rich life\" looks like and allocate accordingly".into(),
        });
    }

    insights
}

fn action_items(income: Money) -> Vec<ActionItem> {
    let mut actions = Vec::new();

    if income < Money::from_units(4000) {
        actions.push(ActionItem::new(
            Priority::High,
            "Increase your income",
            "Focus on earning more through raises, side hustles, or new skills",
            "Next 6 months",
        ));
    }

    actions.extend([
        ActionItem::new(
            Priority::High,
            "Automate your investments",
            "Set up automatic transfers to investment accounts on payday",
            "This week",
        ),
        ActionItem::new(
            Priority::High,
            "Build your emergency fund",
            "Start with $1,000, then work toward 3-6 months of expenses",
            "Next 3 months",
        ),
        ActionItem::new(
            Priority::Medium,
            "Negotiate fixed costs",
            "Call providers to negotiate lower rates on insurance, phone, internet",
            "This month",
        ),
        ActionItem::new(
            Priority::Medium,
            "Define your rich life",
            "List 3-5 things you love spending money on without guilt",
            "This week",
        ),
        ActionItem::new(
            Priority::Low,
            "Review and optimize",
            "Reassess your conscious spending plan quarterly",
            "Every 3 months",
        ),
    ]);

    actions
}

/// Actual vs. planned figures for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanComparison {
    pub month: MonthKey,
    pub actual_income: Money,
    pub actual_fixed_costs: Money,
    pub actual_guilt_free: Money,
    pub income_variance: Money,
    pub fixed_costs_variance: Money,
    pub guilt_free_variance: Money,
    pub recommendations: Vec<String>,
}

impl PlanComparison {
    pub fn compute(
        plan: &SpendingPlan,
        expenses: &[Expense],
        income: &[Income],
        month: MonthKey,
    ) -> Self {
        let mut fixed = Money::zero();
        let mut guilt_free = Money::zero();
        for expense in expenses_in_month(expenses, month) {
            if FIXED_COST_CATEGORIES.contains(&expense.category) {
                fixed += expense.amount;
            } else if GUILT_FREE_CATEGORIES.contains(&expense.category) {
                guilt_free += expense.amount;
            }
        }

        let actual_income = monthly_income(income, month);
        let planned_fixed = plan.allocation(Bucket::FixedCosts);
        let planned_guilt_free = plan.allocation(Bucket::GuiltFree);
        let fixed_costs_variance = fixed - planned_fixed;
        let guilt_free_variance = guilt_free - planned_guilt_free;

        let mut recommendations = Vec::new();
        if fixed_costs_variance > planned_fixed.scale(0.1) {
            recommendations.push(
                "Your fixed costs are significantly over budget. Review and reduce where possible."
                    .to_string(),
            );
        }
        if guilt_free_variance > planned_guilt_free.scale(0.2) {
            recommendations.push(
                "You're overspending on guilt-free items. Consider adjusting your allocations or reducing spending."
                    .to_string(),
            );
        }

        Self {
            month,
            actual_income,
            actual_fixed_costs: fixed,
            actual_guilt_free: guilt_free,
            income_variance: actual_income - plan.income,
            fixed_costs_variance,
            guilt_free_variance,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IncomeSource;
    use chrono::NaiveDate;

    fn plan(units: i64) -> SpendingPlan {
        SpendingPlan::generate(Money::from_units(units), Utc::now()).unwrap()
    }

    #[test]
    fn test_default_split() {
        let p = plan(5000);
        assert_eq!(p.allocation(Bucket::FixedCosts), Money::from_units(3000));
        assert_eq!(p.allocation(Bucket::Investments), Money::from_units(500));
        assert_eq!(p.allocation(Bucket::Savings), Money::from_units(250));
        assert_eq!(p.allocation(Bucket::GuiltFree), Money::from_units(1250));

        // 3000 / 4.33 = 692.84
        assert_eq!(p.allocations[0].weekly, Money::from_cents(69_284));
    }

    #[test]
    fn test_rejects_non_positive_income() {
        assert!(SpendingPlan::generate(Money::zero(), Utc::now())
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_low_income_insights_and_actions() {
        let p = plan(2500);
        let kinds: Vec<_> = p.insights.iter().map(|i| i.kind).collect();
        // guilt-free is 625 > 500
        assert_eq!(kinds, vec![PlanInsightKind::Focus, PlanInsightKind::Opportunity]);

        assert_eq!(p.action_items.len(), 6);
        assert_eq!(p.action_items[0].task, "Increase your income");
    }

    #[test]
    fn test_high_income_insights() {
        let p = plan(9000);
        assert_eq!(p.insights[0].kind, PlanInsightKind::Optimize);
        assert_eq!(p.action_items.len(), 5);
    }

    #[test]
    fn test_small_income_has_no_opportunity() {
        let p = plan(1500);
        // guilt-free is 375
        assert!(p.insights.iter().all(|i| i.kind != PlanInsightKind::Opportunity));
    }

    #[test]
    fn test_high_fixed_costs_with_custom_split() {
        let percentages = AllocationPercentages {
            fixed_costs: 75.0,
            investments: 5.0,
            savings: 5.0,
            guilt_free: 15.0,
        };
        let p = SpendingPlan::with_percentages(Money::from_units(5000), percentages, Utc::now())
            .unwrap();
        assert!(p.insights.iter().any(|i| i.kind == PlanInsightKind::Warning));
    }

    #[test]
    fn test_compare_with_actual() {
        let p = plan(5000);
        let month = MonthKey::new(2025, 4).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
        let now = Utc::now();

        let expenses = vec![
            Expense::new(Money::from_units(3400), ExpenseCategory::Bills, "rent", date, now),
            Expense::new(Money::from_units(1300), ExpenseCategory::Food, "food", date, now),
            Expense::new(Money::from_units(800), ExpenseCategory::Education, "course", date, now),
        ];
        let income = vec![Income::new(
            Money::from_units(4800),
            IncomeSource::Salary,
            "pay",
            date,
            now,
        )];

        let comparison = PlanComparison::compute(&p, &expenses, &income, month);

        assert_eq!(comparison.actual_fixed_costs, Money::from_units(3400));
        assert_eq!(comparison.actual_guilt_free, Money::from_units(1300));
        assert_eq!(comparison.income_variance, Money::from_units(-200));
        assert_eq!(comparison.fixed_costs_variance, Money::from_units(400));
        assert_eq!(comparison.guilt_free_variance, Money::from_units(50));
        // 400 > 10% of 3000; 50 is not > 20% of 1250
        assert_eq!(comparison.recommendations.len(), 1);
    }
}
