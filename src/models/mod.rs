//! Core data models for wedding-budget
//!
//! This module contains the value objects of the calculator: currencies and
//! amounts, cost terms, the gold-denominated mahr, furnishing items, presets
//! and the persisted calculation record.

pub mod amount;
pub mod calculation;
pub mod currency;
pub mod exchange;
pub mod furnishing;
pub mod goldsmithing;
pub mod ids;
pub mod mahr;
pub mod preset;
pub mod term;

pub use amount::{Amount, AmountParseError};
pub use calculation::{BudgetInputs, Calculation, SavedCalculation};
pub use currency::{convert, convert_codes, format_currency, format_from_syp, Currency, Language};
pub use exchange::{ExchangeContext, Toggles};
pub use furnishing::{FurnishingBook, FurnishingCategory, FurnishingItem};
pub use goldsmithing::GoldsmithingClothing;
pub use ids::{CalculationId, FurnishingCategoryId, FurnishingItemId};
pub use mahr::{GoldTerm, MahrInput, MahrView};
pub use preset::{BudgetMode, BudgetPreset};
pub use term::{CostTerm, TermKind, TermUpdate};
