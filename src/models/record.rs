//! Money records: expenses, income and petty-cash entries
//!
//! Records are immutable once created; the only mutation the ledger supports
//! is deletion.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{ExpenseCategory, IncomeSource};
use super::ids::{ExpenseId, IncomeId, PettyCashId};
use super::money::Money;

/// Validation errors shared by all money records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    NonPositiveAmount,
    AmountTooLarge,
    MissingDescription,
    InvalidTime(String),
    InvalidMonthCount(u32),
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Please enter a valid amount"),
            Self::AmountTooLarge => {
                write!(f, "Amount cannot be larger than {}", Money::MAX_AMOUNT)
            }
            Self::MissingDescription => write!(f, "Please enter a description"),
            Self::InvalidTime(t) => write!(f, "Invalid time '{}', expected HH:MM", t),
            Self::InvalidMonthCount(n) => {
                write!(f, "Recurring months must be between 1 and 12 (got {})", n)
            }
        }
    }
}

impl std::error::Error for RecordValidationError {}

fn validate_common(amount: Money, description: &str) -> Result<(), RecordValidationError> {
    if !amount.is_positive() {
        return Err(RecordValidationError::NonPositiveAmount);
    }
    if amount.exceeds_max() {
        return Err(RecordValidationError::AmountTooLarge);
    }
    if description.trim().is_empty() {
        return Err(RecordValidationError::MissingDescription);
    }
    Ok(())
}

/// A single expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub amount: Money,
    pub category: ExpenseCategory,
    pub description: String,
    pub date: NaiveDate,
    /// When the record was entered
    pub timestamp: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        amount: Money,
        category: ExpenseCategory,
        description: impl Into<String>,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            amount,
            category,
            description: description.into().trim().to_string(),
            date,
            timestamp: now,
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        validate_common(self.amount, &self.description)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date, self.amount, self.description, self.category
        )
    }
}

/// How often a recurring income repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecurrenceFrequency {
    Weekly,
    BiWeekly,
    Monthly,
    Quarterly,
}

impl RecurrenceFrequency {
    /// Menu order: option 1 is weekly, option 4 is quarterly
    pub const ALL: &'static [RecurrenceFrequency] = &[
        Self::Weekly,
        Self::BiWeekly,
        Self::Monthly,
        Self::Quarterly,
    ];

    /// Spacing between generated entries
    pub fn interval_days(&self) -> i64 {
        match self {
            Self::Weekly => 7,
            Self::BiWeekly => 14,
            Self::Monthly => 30,
            Self::Quarterly => 90,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::BiWeekly => "Bi-weekly",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
        }
    }

    /// Lowercase name, as used in generated entry descriptions
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::BiWeekly => "bi-weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
        }
    }

    /// Look up a frequency by its 1-based menu number
    pub fn from_option(option: u8) -> Option<Self> {
        Self::ALL.get(usize::from(option).checked_sub(1)?).copied()
    }

    /// Parse a frequency name or menu number
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        if let Ok(n) = s.parse::<u8>() {
            return Self::from_option(n);
        }
        match s.as_str() {
            "weekly" => Some(Self::Weekly),
            "bi-weekly" | "biweekly" => Some(Self::BiWeekly),
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            _ => None,
        }
    }
}

impl fmt::Display for RecurrenceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Recurrence settings stored on the parent income entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringInfo {
    pub frequency: RecurrenceFrequency,
    pub months: u32,
}

impl RecurringInfo {
    pub const DEFAULT_MONTHS: u32 = 12;
    pub const MAX_MONTHS: u32 = 12;

    pub fn new(frequency: RecurrenceFrequency, months: u32) -> Result<Self, RecordValidationError> {
        if months == 0 || months > Self::MAX_MONTHS {
            return Err(RecordValidationError::InvalidMonthCount(months));
        }
        Ok(Self { frequency, months })
    }

    /// Date of the `occurrence`-th generated entry after `start`
    pub fn occurrence_date(&self, start: NaiveDate, occurrence: u32) -> NaiveDate {
        start + Duration::days(self.frequency.interval_days() * i64::from(occurrence))
    }
}

/// A single income entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: IncomeId,
    pub amount: Money,
    pub source: IncomeSource,
    pub description: String,
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,

    #[serde(default)]
    pub recurring: bool,

    /// Present only on the entry that spawned a recurring series
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_info: Option<RecurringInfo>,

    /// Set on entries generated from a recurring parent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<IncomeId>,
}

impl Income {
    pub fn new(
        amount: Money,
        source: IncomeSource,
        description: impl Into<String>,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: IncomeId::new(),
            amount,
            source,
            description: description.into().trim().to_string(),
            date,
            timestamp: now,
            recurring: false,
            recurring_info: None,
            parent_id: None,
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        validate_common(self.amount, &self.description)
    }

    /// Whether this entry was generated from a recurring parent
    pub fn is_generated(&self) -> bool {
        self.parent_id.is_some()
    }
}

impl fmt::Display for Income {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date, self.amount, self.description, self.source
        )
    }
}

/// A small cash purchase counted against the daily limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PettyCashEntry {
    pub id: PettyCashId,
    pub amount: Money,
    pub description: String,
    /// Wall-clock time of the purchase, `HH:MM`
    pub time: String,
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
}

impl PettyCashEntry {
    pub fn new(
        amount: Money,
        description: impl Into<String>,
        time: impl Into<String>,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PettyCashId::new(),
            amount,
            description: description.into().trim().to_string(),
            time: time.into().trim().to_string(),
            date,
            timestamp: now,
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        validate_common(self.amount, &self.description)?;
        NaiveTime::parse_from_str(&self.time, "%H:%M")
            .map_err(|_| RecordValidationError::InvalidTime(self.time.clone()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_expense_validation() {
        let now = Utc::now();
        let ok = Expense::new(
            Money::from_units(12),
            ExpenseCategory::Food,
            "Lunch",
            date(2025, 1, 3),
            now,
        );
        assert!(ok.validate().is_ok());

        let zero = Expense::new(Money::zero(), ExpenseCategory::Food, "Lunch", date(2025, 1, 3), now);
        assert_eq!(zero.validate(), Err(RecordValidationError::NonPositiveAmount));

        let blank = Expense::new(Money::from_units(1), ExpenseCategory::Food, "   ", date(2025, 1, 3), now);
        assert_eq!(blank.validate(), Err(RecordValidationError::MissingDescription));
    }

    #[test]
    fn test_frequency_options() {
        assert_eq!(RecurrenceFrequency::from_option(1), Some(RecurrenceFrequency::Weekly));
        assert_eq!(RecurrenceFrequency::from_option(4), Some(RecurrenceFrequency::Quarterly));
        assert_eq!(RecurrenceFrequency::from_option(0), None);
        assert_eq!(RecurrenceFrequency::from_option(5), None);
        assert_eq!(RecurrenceFrequency::parse("Bi-Weekly"), Some(RecurrenceFrequency::BiWeekly));
        assert_eq!(RecurrenceFrequency::parse("2"), Some(RecurrenceFrequency::BiWeekly));
        assert_eq!(RecurrenceFrequency::parse("daily"), None);
    }

    #[test]
    fn test_recurring_info_bounds() {
        assert!(RecurringInfo::new(RecurrenceFrequency::Monthly, 0).is_err());
        assert!(RecurringInfo::new(RecurrenceFrequency::Monthly, 13).is_err());
        let info = RecurringInfo::new(RecurrenceFrequency::Monthly, 12).unwrap();
        assert_eq!(info.occurrence_date(date(2025, 1, 1), 2), date(2025, 3, 2));
    }

    #[test]
    fn test_income_serialization_omits_empty_links() {
        let income = Income::new(
            Money::from_units(5000),
            IncomeSource::Salary,
            "Pay",
            date(2025, 1, 1),
            Utc::now(),
        );
        let json = serde_json::to_value(&income).unwrap();
        assert!(json.get("parent_id").is_none());
        assert!(json.get("recurring_info").is_none());
        assert_eq!(json["source"], "salary");
    }

    #[test]
    fn test_petty_cash_time_validation() {
        let now = Utc::now();
        let good = PettyCashEntry::new(Money::from_units(5), "Coffee", "08:30", date(2025, 1, 1), now);
        assert!(good.validate().is_ok());

        let bad = PettyCashEntry::new(Money::from_units(5), "Coffee", "8h30", date(2025, 1, 1), now);
        assert!(matches!(bad.validate(), Err(RecordValidationError::InvalidTime(_))));
    }
}
