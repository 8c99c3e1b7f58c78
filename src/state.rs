//! The ledger state container
//!
//! [`Ledger`] owns every persisted record. Services borrow it mutably to
//! change it; reports borrow it immutably. Loading is lenient: a record that
//! does not decode is set aside in [`Unreadable`] with a warning, left out of
//! every computation, and written back unchanged when the ledger is saved.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, SerializeSeq, SerializeStruct, Serializer};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::{Budget, Expense, Goal, Income, MonthKey, PettyCashEntry};

/// All persisted finance data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    pub expenses: Vec<Expense>,
    pub income: Vec<Income>,
    pub goals: Vec<Goal>,
    pub budgets: BTreeMap<MonthKey, Budget>,
    pub petty_cash: Vec<PettyCashEntry>,

    /// Stored records this version cannot decode
    pub unreadable: Unreadable,
}

/// Raw JSON of records that failed to decode, kept so saving never loses them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Unreadable {
    pub expenses: Vec<Value>,
    pub income: Vec<Value>,
    pub goals: Vec<Value>,
    /// Keyed by the month string they were stored under
    pub budgets: BTreeMap<String, Value>,
    pub petty_cash: Vec<Value>,
}

impl Unreadable {
    pub fn len(&self) -> usize {
        self.expenses.len()
            + self.income.len()
            + self.goals.len()
            + self.budgets.len()
            + self.petty_cash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The budget stored for a month, if any
    pub fn budget_for(&self, month: MonthKey) -> Option<&Budget> {
        self.budgets.get(&month)
    }

    /// Whether the ledger holds no usable records
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
            && self.income.is_empty()
            && self.goals.is_empty()
            && self.budgets.is_empty()
            && self.petty_cash.is_empty()
    }
}

/// The on-disk shape before each record is decoded
#[derive(Deserialize)]
struct LedgerDocument {
    #[serde(default)]
    expenses: Vec<Value>,
    #[serde(default)]
    income: Vec<Value>,
    #[serde(default)]
    goals: Vec<Value>,
    #[serde(default)]
    budgets: BTreeMap<String, Value>,
    #[serde(default)]
    petty_cash: Vec<Value>,
}

impl<'de> Deserialize<'de> for Ledger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let doc = LedgerDocument::deserialize(deserializer)?;
        let mut unreadable = Unreadable::default();

        let ledger = Ledger {
            expenses: decode_records(doc.expenses, &mut unreadable.expenses),
            income: decode_records(doc.income, &mut unreadable.income),
            goals: decode_records(doc.goals, &mut unreadable.goals),
            budgets: decode_budgets(doc.budgets, &mut unreadable.budgets),
            petty_cash: decode_records(doc.petty_cash, &mut unreadable.petty_cash),
            unreadable: Unreadable::default(),
        };

        if !unreadable.is_empty() {
            tracing::warn!(
                count = unreadable.len(),
                "Ledger has records that could not be decoded; they are ignored and kept on save"
            );
        }

        Ok(Ledger { unreadable, ..ledger })
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

fn decode_records<T: DeserializeOwned>(raw: Vec<Value>, unreadable: &mut Vec<Value>) -> Vec<T> {
    let mut records = Vec::with_capacity(raw.len());

    for (index, value) in raw.into_iter().enumerate() {
        match T::deserialize(&value) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(
                    record = short_type_name::<T>(),
                    index,
                    error = %e,
                    "Skipping undecodable record"
                );
                unreadable.push(value);
            }
        }
    }

    records
}

fn decode_budgets(
    raw: BTreeMap<String, Value>,
    unreadable: &mut BTreeMap<String, Value>,
) -> BTreeMap<MonthKey, Budget> {
    let mut budgets = BTreeMap::new();

    for (key, value) in raw {
        match Budget::deserialize(&value) {
            Ok(budget) => {
                if budget.month.to_string() != key {
                    tracing::warn!(key = %key, month = %budget.month, "Budget key does not match its month; using the month");
                }
                budgets.insert(budget.month, budget);
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Skipping undecodable budget");
                unreadable.insert(key, value);
            }
        }
    }

    budgets
}

/// Decoded records followed by the raw ones that did not decode
struct RecordList<'a, T> {
    records: &'a [T],
    unreadable: &'a [Value],
}

impl<T: Serialize> Serialize for RecordList<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.records.len() + self.unreadable.len()))?;
        for record in self.records {
            seq.serialize_element(record)?;
        }
        for value in self.unreadable {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

/// Budgets keyed by month; a decoded budget replaces an unreadable one
/// stored under the same key
struct BudgetMap<'a> {
    budgets: &'a BTreeMap<MonthKey, Budget>,
    unreadable: &'a BTreeMap<String, Value>,
}

impl Serialize for BudgetMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let decoded: BTreeMap<String, &Budget> = self
            .budgets
            .iter()
            .map(|(month, budget)| (month.to_string(), budget))
            .collect();
        let kept: Vec<(&String, &Value)> = self
            .unreadable
            .iter()
            .filter(|(key, _)| !decoded.contains_key(*key))
            .collect();

        let mut map = serializer.serialize_map(Some(decoded.len() + kept.len()))?;
        for (key, budget) in &decoded {
            map.serialize_entry(key, budget)?;
        }
        for (key, value) in kept {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for Ledger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Ledger", 5)?;
        state.serialize_field(
            "expenses",
            &RecordList { records: &self.expenses, unreadable: &self.unreadable.expenses },
        )?;
        state.serialize_field(
            "income",
            &RecordList { records: &self.income, unreadable: &self.unreadable.income },
        )?;
        state.serialize_field(
            "goals",
            &RecordList { records: &self.goals, unreadable: &self.unreadable.goals },
        )?;
        state.serialize_field(
            "budgets",
            &BudgetMap { budgets: &self.budgets, unreadable: &self.unreadable.budgets },
        )?;
        state.serialize_field(
            "petty_cash",
            &RecordList { records: &self.petty_cash, unreadable: &self.unreadable.petty_cash },
        )?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, Money};
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_empty_document_loads() {
        let ledger: Ledger = serde_json::from_str("{}").unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_undecodable_expense_is_skipped() {
        let good = Expense::new(
            Money::from_units(10),
            ExpenseCategory::Food,
            "Lunch",
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            Utc::now(),
        );
        let mut bad = serde_json::to_value(&good).unwrap();
        bad["category"] = serde_json::json!("groceries");

        let doc = serde_json::json!({
            "expenses": [serde_json::to_value(&good).unwrap(), bad],
        });
        let ledger: Ledger = serde_json::from_value(doc).unwrap();

        assert_eq!(ledger.expenses, vec![good]);
        assert_eq!(ledger.unreadable.expenses.len(), 1);
    }

    #[test]
    fn test_undecodable_records_survive_round_trip() {
        let good = Expense::new(
            Money::from_units(10),
            ExpenseCategory::Food,
            "Lunch",
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            Utc::now(),
        );
        let mut legacy = serde_json::to_value(&good).unwrap();
        legacy["category"] = serde_json::json!("groceries");
        legacy["description"] = serde_json::json!("legacy");
        let legacy_budget = serde_json::json!({"month": "2025-02", "amounts": {"pets": 100}});

        let doc = serde_json::json!({
            "expenses": [legacy.clone()],
            "budgets": {"2025-02": legacy_budget.clone()},
        });
        let mut ledger: Ledger = serde_json::from_value(doc).unwrap();
        assert!(ledger.expenses.is_empty());
        assert!(ledger.budgets.is_empty());

        ledger.expenses.push(good.clone());
        let saved = serde_json::to_value(&ledger).unwrap();

        assert_eq!(saved["expenses"].as_array().unwrap().len(), 2);
        assert!(saved["expenses"].as_array().unwrap().contains(&legacy));
        assert_eq!(saved["budgets"]["2025-02"], legacy_budget);

        let reloaded: Ledger = serde_json::from_value(saved).unwrap();
        assert_eq!(reloaded.expenses, vec![good]);
        assert_eq!(reloaded.unreadable, ledger.unreadable);
    }

    #[test]
    fn test_decoded_budget_replaces_unreadable_one() {
        let doc = serde_json::json!({
            "budgets": {"2025-02": {"month": "2025-02", "amounts": {"pets": 100}}},
        });
        let mut ledger: Ledger = serde_json::from_value(doc).unwrap();
        let month = MonthKey::new(2025, 2).unwrap();
        let budget = Budget::with_amounts(
            month,
            [(ExpenseCategory::Food, Money::from_units(300))],
            Utc::now(),
        );
        ledger.budgets.insert(month, budget.clone());

        let saved = serde_json::to_value(&ledger).unwrap();
        let reloaded: Ledger = serde_json::from_value(saved).unwrap();
        assert_eq!(reloaded.budget_for(month), Some(&budget));
        assert!(reloaded.unreadable.is_empty());
    }

    #[test]
    fn test_undecodable_budget_is_skipped() {
        let month = MonthKey::new(2025, 1).unwrap();
        let budget = Budget::with_amounts(
            month,
            [(ExpenseCategory::Food, Money::from_units(300))],
            Utc::now(),
        );
        let doc = serde_json::json!({
            "budgets": {
                "2025-01": serde_json::to_value(&budget).unwrap(),
                "2025-02": {"month": "2025-02", "amounts": {"pets": 100}},
            }
        });
        let ledger: Ledger = serde_json::from_value(doc).unwrap();

        assert_eq!(ledger.budgets.len(), 1);
        assert_eq!(ledger.budget_for(month), Some(&budget));
        assert!(ledger.unreadable.budgets.contains_key("2025-02"));
    }

    #[test]
    fn test_round_trip_keeps_budgets_keyed_by_month() {
        let mut ledger = Ledger::new();
        let month = MonthKey::new(2025, 3).unwrap();
        ledger.budgets.insert(
            month,
            Budget::with_amounts(month, [(ExpenseCategory::Bills, Money::from_units(900))], Utc::now()),
        );

        let json = serde_json::to_value(&ledger).unwrap();
        assert!(json["budgets"].get("2025-03").is_some());

        let back: Ledger = serde_json::from_value(json).unwrap();
        assert_eq!(back, ledger);
    }
}
