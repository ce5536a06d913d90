//! Strongly-typed ID wrappers
//!
//! Calculations, furnishing categories and furnishing items each get their
//! own newtype so a category id can never be passed where an item id is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create a fixed ID, used for built-in records
            pub const fn from_u128(value: u128) -> Self {
                Self(Uuid::from_u128(value))
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short form shown to users (`prefix` + first 8 hex digits)
            pub fn short(&self) -> String {
                format!("{}{}", $display_prefix, &self.0.simple().to_string()[..8])
            }

            /// Whether `s` is this id's short form, its full UUID, or a prefix of either
            pub fn matches(&self, s: &str) -> bool {
                let s = s.trim();
                if s.is_empty() {
                    return false;
                }
                let bare = s.strip_prefix($display_prefix).unwrap_or(s);
                self.0.to_string().starts_with(bare) || self.0.simple().to_string().starts_with(bare)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.short())
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(CalculationId, "calc-");
define_id!(FurnishingCategoryId, "fcat-");
define_id!(FurnishingItemId, "item-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = CalculationId::new();
        let display = id.to_string();
        assert!(display.starts_with("calc-"));
        assert_eq!(display.len(), 13);
    }

    #[test]
    fn test_fixed_ids_are_stable() {
        let a = FurnishingCategoryId::from_u128(1);
        let b = FurnishingCategoryId::from_u128(1);
        assert_eq!(a, b);
        assert_eq!(a.short(), "fcat-00000000");
    }

    #[test]
    fn test_matches_short_and_full_forms() {
        let id = FurnishingItemId::new();
        assert!(id.matches(&id.short()));
        assert!(id.matches(&id.as_uuid().to_string()));
        assert!(id.matches(&id.short()[..8]));
        assert!(!id.matches(""));
    }

    #[test]
    fn test_id_parse() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: CalculationId = uuid_str.parse().unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);

        let prefixed: CalculationId = format!("calc-{}", uuid_str).parse().unwrap();
        assert_eq!(id, prefixed);
    }

    #[test]
    fn test_id_serialization() {
        let id = FurnishingCategoryId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: FurnishingCategoryId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
