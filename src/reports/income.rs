//! Income queries, trends and the income summary report

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Income, IncomeSource, Money, MonthKey};

/// Months considered when averaging monthly income
pub const AVERAGE_WINDOW_MONTHS: u32 = 6;

pub fn monthly_income(records: &[Income], month: MonthKey) -> Money {
    records
        .iter()
        .filter(|i| month.contains(i.date))
        .map(|i| i.amount)
        .sum()
}

pub fn source_total(records: &[Income], month: MonthKey, source: IncomeSource) -> Money {
    records
        .iter()
        .filter(|i| month.contains(i.date) && i.source == source)
        .map(|i| i.amount)
        .sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceAmount {
    pub source: IncomeSource,
    pub amount: Money,
}

/// Per-source totals for a month, omitting sources with no income
pub fn source_breakdown(records: &[Income], month: MonthKey) -> Vec<SourceAmount> {
    IncomeSource::ALL
        .iter()
        .map(|&source| SourceAmount {
            source,
            amount: source_total(records, month, source),
        })
        .filter(|s| s.amount.is_positive())
        .collect()
}

/// Average income over the six months ending with `current`, counting only
/// months that had any income. Zero when none did.
pub fn average_monthly_income(records: &[Income], current: MonthKey) -> Money {
    let earning: Vec<Money> = current
        .trailing(AVERAGE_WINDOW_MONTHS)
        .into_iter()
        .map(|m| monthly_income(records, m))
        .filter(|total| total.is_positive())
        .collect();

    let total: Money = earning.iter().sum();
    total.split(earning.len() as i64)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyIncome {
    pub month: MonthKey,
    pub total: Money,
    pub sources: Vec<SourceAmount>,
}

/// Income for the `months` months ending with `current`, oldest first
pub fn income_trends(records: &[Income], current: MonthKey, months: u32) -> Vec<MonthlyIncome> {
    current
        .trailing(months)
        .into_iter()
        .map(|month| MonthlyIncome {
            month,
            total: monthly_income(records, month),
            sources: source_breakdown(records, month),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceIncomeStats {
    pub source: IncomeSource,
    pub total: Money,
    pub current_month: Money,
    pub count: usize,
}

/// All-time and recent income figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeStats {
    pub total: Money,
    pub current_month: Money,
    pub last_month: Money,
    pub recurring_count: usize,
    pub average_monthly: Money,
    pub by_source: Vec<SourceIncomeStats>,
}

impl IncomeStats {
    pub fn compute(records: &[Income], today: NaiveDate) -> Self {
        let current = MonthKey::from_date(today);

        Self {
            total: records.iter().map(|i| i.amount).sum(),
            current_month: monthly_income(records, current),
            last_month: monthly_income(records, current.prev()),
            recurring_count: records.iter().filter(|i| i.recurring).count(),
            average_monthly: average_monthly_income(records, current),
            by_source: IncomeSource::ALL
                .iter()
                .map(|&source| {
                    let from_source = || records.iter().filter(move |i| i.source == source);
                    SourceIncomeStats {
                        source,
                        total: from_source().map(|i| i.amount).sum(),
                        current_month: source_total(records, current, source),
                        count: from_source().count(),
                    }
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthAmount {
    pub month: MonthKey,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceAnalysis {
    pub source: IncomeSource,
    pub total: Money,
    pub percentage: f64,
    pub average: Money,
}

/// Income over a range of months
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeReport {
    pub start: MonthKey,
    pub end: MonthKey,
    pub total: Money,
    /// Averaged over every month in the range, including empty ones
    pub average_monthly: Money,
    pub highest_month: Option<MonthAmount>,
    /// Lowest month with any income
    pub lowest_month: Option<MonthAmount>,
    pub months: Vec<MonthlyIncome>,
    pub sources: Vec<SourceAnalysis>,
}

impl IncomeReport {
    /// Report over `start..=end`. An inverted range yields an empty report.
    pub fn generate(records: &[Income], start: MonthKey, end: MonthKey) -> Self {
        let mut range = Vec::new();
        let mut month = start;
        while month <= end {
            range.push(month);
            month = month.next();
        }

        let months: Vec<MonthlyIncome> = range
            .iter()
            .map(|&month| MonthlyIncome {
                month,
                total: monthly_income(records, month),
                sources: source_breakdown(records, month),
            })
            .collect();

        let total: Money = months.iter().map(|m| m.total).sum();

        let mut highest_month: Option<MonthAmount> = None;
        let mut lowest_month: Option<MonthAmount> = None;
        for m in months.iter().filter(|m| m.total.is_positive()) {
            if highest_month.as_ref().map_or(true, |h| m.total > h.amount) {
                highest_month = Some(MonthAmount {
                    month: m.month,
                    amount: m.total,
                });
            }
            if lowest_month.as_ref().map_or(true, |l| m.total < l.amount) {
                lowest_month = Some(MonthAmount {
                    month: m.month,
                    amount: m.total,
                });
            }
        }

        let sources = IncomeSource::ALL
            .iter()
            .filter_map(|&source| {
                let source_sum: Money = range
                    .iter()
                    .map(|&m| source_total(records, m, source))
                    .sum();
                source_sum.is_positive().then(|| SourceAnalysis {
                    source,
                    total: source_sum,
                    percentage: source_sum.percent_of(total),
                    average: source_sum.split(range.len() as i64),
                })
            })
            .collect();

        Self {
            start,
            end,
            total,
            average_monthly: total.split(range.len() as i64),
            highest_month,
            lowest_month,
            months,
            sources,
        }
    }
}
