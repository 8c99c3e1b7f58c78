//! Expense queries: monthly totals, top categories and statistics

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Expense, ExpenseCategory, Money, MonthKey};

/// Expenses dated within `month`
pub fn expenses_in_month(records: &[Expense], month: MonthKey) -> impl Iterator<Item = &Expense> {
    records.iter().filter(move |e| month.contains(e.date))
}

pub fn monthly_total(records: &[Expense], month: MonthKey) -> Money {
    expenses_in_month(records, month).map(|e| e.amount).sum()
}

pub fn category_total(records: &[Expense], month: MonthKey, category: ExpenseCategory) -> Money {
    expenses_in_month(records, month)
        .filter(|e| e.category == category)
        .map(|e| e.amount)
        .sum()
}

/// A category's share of total spending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: ExpenseCategory,
    pub amount: Money,
    pub percentage: f64,
}

/// Categories ranked by spending, largest first. With `month` set, only
/// that month's expenses count. Categories with no spending are left out.
pub fn top_categories(
    records: &[Expense],
    month: Option<MonthKey>,
    limit: usize,
) -> Vec<CategoryShare> {
    let in_scope = |e: &&Expense| month.map_or(true, |m| m.contains(e.date));
    let grand_total: Money = records.iter().filter(in_scope).map(|e| e.amount).sum();

    let mut shares: Vec<CategoryShare> = ExpenseCategory::ALL
        .iter()
        .map(|&category| {
            let amount: Money = records
                .iter()
                .filter(in_scope)
                .filter(|e| e.category == category)
                .map(|e| e.amount)
                .sum();
            CategoryShare {
                category,
                amount,
                percentage: amount.percent_of(grand_total),
            }
        })
        .filter(|s| s.amount.is_positive())
        .collect();

    // Stable: equal amounts keep category order
    shares.sort_by(|a, b| b.amount.cmp(&a.amount));
    shares.truncate(limit);
    shares
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryExpenseStats {
    pub category: ExpenseCategory,
    pub total: Money,
    pub current_month: Money,
    pub count: usize,
}

/// All-time and recent expense totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseStats {
    pub total: Money,
    pub current_month: Money,
    pub last_month: Money,
    pub by_category: Vec<CategoryExpenseStats>,
}

impl ExpenseStats {
    pub fn compute(records: &[Expense], today: NaiveDate) -> Self {
        let current = MonthKey::from_date(today);

        Self {
            total: records.iter().map(|e| e.amount).sum(),
            current_month: monthly_total(records, current),
            last_month: monthly_total(records, current.prev()),
            by_category: ExpenseCategory::ALL
                .iter()
                .map(|&category| CategoryExpenseStats {
                    category,
                    total: records
                        .iter()
                        .filter(|e| e.category == category)
                        .map(|e| e.amount)
                        .sum(),
                    current_month: category_total(records, current, category),
                    count: records.iter().filter(|e| e.category == category).count(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn expense(category: ExpenseCategory, units: i64, y: i32, m: u32, d: u32) -> Expense {
        Expense::new(
            Money::from_units(units),
            category,
            "test",
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            Utc::now(),
        )
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(ExpenseCategory::Food, 120, 2025, 2, 3),
            expense(ExpenseCategory::Food, 80, 2025, 2, 14),
            expense(ExpenseCategory::Bills, 300, 2025, 2, 1),
            expense(ExpenseCategory::Shopping, 100, 2025, 2, 20),
            expense(ExpenseCategory::Food, 50, 2025, 1, 28),
        ]
    }

    #[test]
    fn test_monthly_and_category_totals() {
        let records = sample();
        let feb = MonthKey::new(2025, 2).unwrap();
        assert_eq!(monthly_total(&records, feb), Money::from_units(600));
        assert_eq!(
            category_total(&records, feb, ExpenseCategory::Food),
            Money::from_units(200)
        );
        assert_eq!(
            category_total(&records, feb, ExpenseCategory::Education),
            Money::zero()
        );
    }

    #[test]
    fn test_top_categories_for_month() {
        let records = sample();
        let top = top_categories(&records, MonthKey::new(2025, 2).ok(), 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].category, ExpenseCategory::Bills);
        assert_eq!(top[0].percentage, 50.0);
        assert_eq!(top[1].category, ExpenseCategory::Food);
    }

    #[test]
    fn test_top_categories_all_time_ties_keep_order() {
        let records = vec![
            expense(ExpenseCategory::Other, 10, 2025, 1, 1),
            expense(ExpenseCategory::Food, 10, 2025, 1, 1),
        ];
        let top = top_categories(&records, None, 5);
        assert_eq!(top[0].category, ExpenseCategory::Food);
        assert_eq!(top[1].category, ExpenseCategory::Other);
        assert_eq!(top[0].percentage, 50.0);
    }

    #[test]
    fn test_stats() {
        let stats = ExpenseStats::compute(&sample(), NaiveDate::from_ymd_opt(2025, 2, 25).unwrap());

        assert_eq!(stats.total, Money::from_units(650));
        assert_eq!(stats.current_month, Money::from_units(600));
        assert_eq!(stats.last_month, Money::from_units(50));

        let food = &stats.by_category[0];
        assert_eq!(food.category, ExpenseCategory::Food);
        assert_eq!(food.total, Money::from_units(250));
        assert_eq!(food.current_month, Money::from_units(200));
        assert_eq!(food.count, 3);
    }
}
