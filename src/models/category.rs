//! Closed tag enumerations
//!
//! Expense categories, income sources and goal categories are each defined
//! once here. Aggregation, insights, validation and the CLI all iterate the
//! `ALL` tables, so the sets can never drift apart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a string does not name a member of a closed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagParseError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

impl fmt::Display for TagParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown {} '{}' (expected one of: {})",
            self.kind, self.value, self.expected
        )
    }
}

impl std::error::Error for TagParseError {}

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $tag:literal, $label:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $tag)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in canonical order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The storage tag (lowercase)
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $tag,)+
                }
            }

            /// Human-readable name
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.label())
            }
        }

        impl FromStr for $name {
            type Err = TagParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| {
                        v.as_str().eq_ignore_ascii_case(needle)
                            || v.label().eq_ignore_ascii_case(needle)
                    })
                    .ok_or_else(|| TagParseError {
                        kind: $kind,
                        value: needle.to_string(),
                        expected: $name::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

closed_enum! {
    /// Category of an expense or a budget line
    ExpenseCategory, "category" {
        Food => "food", "Food";
        Transportation => "transportation", "Transportation";
        Shopping => "shopping", "Shopping";
        Entertainment => "entertainment", "Entertainment";
        Bills => "bills", "Bills";
        Healthcare => "healthcare", "Healthcare";
        Education => "education", "Education";
        Other => "other", "Other";
    }
}

closed_enum! {
    /// Where an income entry came from
    IncomeSource, "income source" {
        Salary => "salary", "Salary";
        Freelance => "freelance", "Freelance";
        Business => "business", "Business";
        Investment => "investment", "Investment";
        Rental => "rental", "Rental";
        Other => "other", "Other";
    }
}

closed_enum! {
    /// What a savings goal is for
    GoalCategory, "goal category" {
        Emergency => "emergency", "Emergency Fund";
        Vacation => "vacation", "Vacation";
        Car => "car", "Car";
        House => "house", "House";
        Investment => "investment", "Investment";
        Education => "education", "Education";
        Other => "other", "Other";
    }
}
