//! Budget presets
//!
//! A preset is an immutable bundle of default values for every cost term.
//! Selecting one overwrites the current values and reseeds furnishing items.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::currency::Language;
use crate::error::BudgetError;

/// The three named budget levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetMode {
    Economic,
    #[default]
    Medium,
    Luxury,
}

impl BudgetMode {
    pub const ALL: [BudgetMode; 3] = [BudgetMode::Economic, BudgetMode::Medium, BudgetMode::Luxury];

    /// Default values for this mode
    pub const fn preset(self) -> &'static BudgetPreset {
        match self {
            BudgetMode::Economic => &ECONOMIC,
            BudgetMode::Medium => &MEDIUM,
            BudgetMode::Luxury => &LUXURY,
        }
    }

    pub fn label(self, language: Language) -> &'static str {
        match self {
            BudgetMode::Economic => language.pick("اقتصادي", "Economic"),
            BudgetMode::Medium => language.pick("متوسط", "Medium"),
            BudgetMode::Luxury => language.pick("فاخر", "Luxury"),
        }
    }
}

impl fmt::Display for BudgetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BudgetMode::Economic => "economic",
            BudgetMode::Medium => "medium",
            BudgetMode::Luxury => "luxury",
        })
    }
}

impl FromStr for BudgetMode {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "economic" | "economy" => Ok(BudgetMode::Economic),
            "medium" => Ok(BudgetMode::Medium),
            "luxury" => Ok(BudgetMode::Luxury),
            other => Err(BudgetError::Validation(format!(
                "Unknown budget mode: {} (expected economic, medium or luxury)",
                other
            ))),
        }
    }
}

/// Default values of one budget mode; all money values are SYP
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetPreset {
    pub gold_advance: f64,
    pub gold_deferred: f64,
    pub home_furnishing: f64,
    pub wedding_cost: f64,
    pub honeymoon: f64,
    pub additional_expenses: f64,
    pub rent_monthly: f64,
    pub rent_months: u32,
}

const ECONOMIC: BudgetPreset = BudgetPreset {
    gold_advance: 50.0,
    gold_deferred: 25.0,
    home_furnishing: 30_000_000.0,
    wedding_cost: 10_000_000.0,
    honeymoon: 2_000_000.0,
    additional_expenses: 4_000_000.0,
    rent_monthly: 400_000.0,
    rent_months: 6,
};

const MEDIUM: BudgetPreset = BudgetPreset {
    gold_advance: 100.0,
    gold_deferred: 50.0,
    home_furnishing: 61_000_000.0,
    wedding_cost: 25_500_000.0,
    honeymoon: 4_000_000.0,
    additional_expenses: 7_500_000.0,
    rent_monthly: 600_000.0,
    rent_months: 6,
};

const LUXURY: BudgetPreset = BudgetPreset {
    gold_advance: 150.0,
    gold_deferred: 75.0,
    home_furnishing: 100_000_000.0,
    wedding_cost: 50_000_000.0,
    honeymoon: 10_000_000.0,
    additional_expenses: 15_000_000.0,
    rent_monthly: 800_000.0,
    rent_months: 6,
};
