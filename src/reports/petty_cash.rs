//! Petty-cash daily limit tracking
//!
//! The alert level is a pure function of the day's spent total, so it is
//! re-evaluated from scratch on every query.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::models::{Money, PettyCashEntry};

/// Percent of the daily limit at which a warning is raised
pub const WARNING_PERCENT: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpendingAlert {
    Warning,
    LimitExceeded,
}

impl SpendingAlert {
    fn for_percent(percent_used: f64) -> Option<Self> {
        if percent_used >= 100.0 {
            Some(Self::LimitExceeded)
        } else if percent_used >= WARNING_PERCENT {
            Some(Self::Warning)
        } else {
            None
        }
    }
}

impl fmt::Display for SpendingAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::LimitExceeded => write!(f, "limit-exceeded"),
        }
    }
}

/// Today's spending against the daily limit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyLimitStatus {
    pub date: NaiveDate,
    pub limit: Money,
    pub spent: Money,
    /// `max(0, limit - spent)`
    pub remaining: Money,
    pub percent_used: f64,
    pub alert: Option<SpendingAlert>,
    pub entry_count: usize,
}

impl DailyLimitStatus {
    /// Amount spent beyond the limit
    pub fn over_by(&self) -> Money {
        (self.spent - self.limit).clamp_non_negative()
    }

    /// User-facing text for the current alert, if any
    pub fn alert_message(&self) -> Option<String> {
        match self.alert? {
            SpendingAlert::LimitExceeded => Some(format!(
                "You've exceeded your daily limit by {}!",
                self.over_by()
            )),
            SpendingAlert::Warning => Some(format!(
                "You've used {}% of your daily limit. {} remaining.",
                self.percent_used.round(),
                self.remaining
            )),
        }
    }
}

/// Total petty-cash spending on one date
pub fn spent_on(entries: &[PettyCashEntry], date: NaiveDate) -> Money {
    entries.iter().filter(|e| e.date == date).map(|e| e.amount).sum()
}

/// Compare today's petty-cash spending with the daily limit
pub fn compute_daily_status(
    entries: &[PettyCashEntry],
    limit: Money,
    today: NaiveDate,
) -> DailyLimitStatus {
    let spent = spent_on(entries, today);
    let percent_used = spent.percent_of(limit);

    DailyLimitStatus {
        date: today,
        limit,
        spent,
        remaining: (limit - spent).clamp_non_negative(),
        percent_used,
        alert: SpendingAlert::for_percent(percent_used),
        entry_count: entries.iter().filter(|e| e.date == today).count(),
    }
}

/// One day in a spending breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySpending {
    pub date: NaiveDate,
    pub amount: Money,
    pub percent_of_limit: f64,
    pub over_limit: bool,
}

/// Spending statistics over a trailing window of days
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PettyCashStats {
    pub days: u32,
    pub total: Money,
    pub daily_average: Money,
    pub days_over_limit: usize,
    /// `None` when nothing was spent in the window
    pub highest_day: Option<DaySpending>,
    /// Lowest day with any spending
    pub lowest_day: Option<DaySpending>,
    /// Newest day first
    pub breakdown: Vec<DaySpending>,
}

impl PettyCashStats {
    /// Statistics for the `days` days ending with `today`
    pub fn compute(entries: &[PettyCashEntry], limit: Money, today: NaiveDate, days: u32) -> Self {
        let breakdown: Vec<DaySpending> = (0..i64::from(days))
            .map(|offset| {
                let date = today - Duration::days(offset);
                let amount = spent_on(entries, date);
                DaySpending {
                    date,
                    amount,
                    percent_of_limit: amount.percent_of(limit),
                    over_limit: amount > limit,
                }
            })
            .collect();

        let total: Money = breakdown.iter().map(|d| d.amount).sum();

        // Ties keep the newest day
        let highest_day = breakdown
            .iter()
            .filter(|d| d.amount.is_positive())
            .fold(None::<&DaySpending>, |best, d| match best {
                Some(b) if b.amount >= d.amount => Some(b),
                _ => Some(d),
            })
            .cloned();
        let lowest_day = breakdown
            .iter()
            .filter(|d| d.amount.is_positive())
            .fold(None::<&DaySpending>, |best, d| match best {
                Some(b) if b.amount <= d.amount => Some(b),
                _ => Some(d),
            })
            .cloned();

        Self {
            days,
            total,
            daily_average: total.split(i64::from(days)),
            days_over_limit: breakdown.iter().filter(|d| d.over_limit).count(),
            highest_day,
            lowest_day,
            breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn entry(units: i64, date: NaiveDate) -> PettyCashEntry {
        PettyCashEntry::new(Money::from_units(units), "snack", "10:00", date, Utc::now())
    }

    #[test]
    fn test_limit_exceeded() {
        let entries = vec![entry(5, day(10)), entry(10, day(10)), entry(6, day(10))];
        let status = compute_daily_status(&entries, Money::from_units(20), day(10));

        assert_eq!(status.spent, Money::from_units(21));
        assert_eq!(status.remaining, Money::zero());
        assert_eq!(status.alert, Some(SpendingAlert::LimitExceeded));
        assert_eq!(status.entry_count, 3);
        assert_eq!(
            status.alert_message().unwrap(),
            "You've exceeded your daily limit by $1.00!"
        );
    }

    #[test]
    fn test_alert_thresholds() {
        let limit = Money::from_units(20);
        let at = |units: i64| {
            compute_daily_status(&[entry(units, day(1))], limit, day(1)).alert
        };
        assert_eq!(at(15), None);
        assert_eq!(at(16), Some(SpendingAlert::Warning));
        assert_eq!(at(19), Some(SpendingAlert::Warning));
        assert_eq!(at(20), Some(SpendingAlert::LimitExceeded));
    }

    #[test]
    fn test_warning_message() {
        let status = compute_daily_status(&[entry(17, day(1))], Money::from_units(20), day(1));
        assert_eq!(
            status.alert_message().unwrap(),
            "You've used 85% of your daily limit. $3.00 remaining."
        );
    }

    #[test]
    fn test_other_days_ignored() {
        let entries = vec![entry(50, day(9)), entry(4, day(10))];
        let status = compute_daily_status(&entries, Money::from_units(20), day(10));
        assert_eq!(status.spent, Money::from_units(4));
        assert_eq!(status.alert, None);
    }

    #[test]
    fn test_zero_limit() {
        let status = compute_daily_status(&[entry(5, day(1))], Money::zero(), day(1));
        assert_eq!(status.percent_used, 0.0);
        assert_eq!(status.alert, None);
        assert_eq!(status.remaining, Money::zero());
    }

    #[test]
    fn test_stats_window() {
        let entries = vec![
            entry(25, day(10)),
            entry(5, day(9)),
            entry(12, day(7)),
            entry(3, day(7)),
            entry(100, day(1)),
        ];
        let stats = PettyCashStats::compute(&entries, Money::from_units(20), day(10), 7);

        assert_eq!(stats.breakdown.len(), 7);
        assert_eq!(stats.breakdown[0].date, day(10));
        assert_eq!(stats.breakdown[6].date, day(4));
        assert_eq!(stats.total, Money::from_units(45));
        assert_eq!(stats.daily_average, Money::from_cents(643));
        assert_eq!(stats.days_over_limit, 1);
        assert_eq!(stats.highest_day.as_ref().unwrap().date, day(10));
        assert_eq!(stats.lowest_day.as_ref().unwrap().date, day(9));
        assert_eq!(stats.lowest_day.as_ref().unwrap().amount, Money::from_units(5));
    }

    #[test]
    fn test_stats_empty_window() {
        let stats = PettyCashStats::compute(&[], Money::from_units(20), day(10), 7);
        assert_eq!(stats.total, Money::zero());
        assert!(stats.highest_day.is_none());
        assert!(stats.lowest_day.is_none());
    }
}
