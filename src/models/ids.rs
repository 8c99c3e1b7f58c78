//! Strongly-typed ID wrappers for ledger entities
//!
//! Each ID displays as a short prefixed form (`exp-1a2b3c4d`). The CLI accepts
//! either the full UUID or any unambiguous prefix of it, with or without the
//! display prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse a full ID, with or without the display prefix
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// Check whether a user-supplied reference (full or shortened,
            /// with or without the display prefix) points at this ID
            pub fn matches(&self, reference: &str) -> bool {
                let reference = reference.trim();
                let reference = reference
                    .strip_prefix($display_prefix)
                    .unwrap_or(reference)
                    .to_ascii_lowercase();
                !reference.is_empty() && self.0.to_string().starts_with(&reference)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

define_id!(ExpenseId, "exp-");
define_id!(IncomeId, "inc-");
define_id!(GoalId, "gol-");
define_id!(PettyCashId, "pet-");
