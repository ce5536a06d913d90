//! Calculation records
//!
//! `BudgetInputs` is everything a user types into the calculator. A
//! `Calculation` wraps it with identity, exchange rates and timestamps so it
//! can be persisted and reopened. `SavedCalculation` is the short summary row
//! kept in the saved-calculations listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::currency::{Currency, Language};
use super::exchange::{ExchangeContext, Toggles};
use super::goldsmithing::GoldsmithingClothing;
use super::ids::CalculationId;
use super::mahr::MahrInput;
use super::preset::BudgetMode;
use super::term::{CostTerm, TermKind};

/// All user-editable inputs of one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetInputs {
    #[serde(default)]
    pub budget_mode: BudgetMode,

    #[serde(default)]
    pub toggles: Toggles,

    pub mahr_advance: MahrInput,

    pub mahr_deferred: MahrInput,

    /// Replaces the advance when the advance is not paid
    #[serde(default)]
    pub goldsmithing: GoldsmithingClothing,

    /// Fallback furnishing value, used only when there are no furnishing items
    pub home_furnishing: CostTerm,

    pub wedding_cost: CostTerm,

    pub honeymoon: CostTerm,

    pub additional_expenses: CostTerm,

    /// Monthly rent
    pub rent: CostTerm,

    pub rent_months: u32,
}

impl Default for BudgetInputs {
    fn default() -> Self {
        Self::from_preset(BudgetMode::default())
    }
}

impl BudgetInputs {
    /// Inputs filled from a preset, every money term in SYP
    pub fn from_preset(mode: BudgetMode) -> Self {
        let mut inputs = Self {
            budget_mode: mode,
            toggles: Toggles::default(),
            mahr_advance: MahrInput::default(),
            mahr_deferred: MahrInput::default(),
            goldsmithing: GoldsmithingClothing::default(),
            home_furnishing: CostTerm::new(TermKind::HomeFurnishing, Amount::zero()),
            wedding_cost: CostTerm::new(TermKind::WeddingCost, Amount::zero()),
            honeymoon: CostTerm::new(TermKind::Honeymoon, Amount::zero()),
            additional_expenses: CostTerm::new(TermKind::AdditionalExpenses, Amount::zero()),
            rent: CostTerm::new(TermKind::Rent, Amount::zero()),
            rent_months: 0,
        };
        inputs.overwrite_with_preset(mode);
        inputs
    }

    /// Overwrite every preset-controlled value
    ///
    /// Preset values are SYP, so each money term is reset to SYP. Toggles and
    /// the goldsmithing section are left alone.
    pub fn overwrite_with_preset(&mut self, mode: BudgetMode) {
        let preset = mode.preset();
        self.budget_mode = mode;
        self.mahr_advance.gold.grams = preset.gold_advance;
        self.mahr_deferred.gold.grams = preset.gold_deferred;
        self.home_furnishing.amount = Amount::syp(preset.home_furnishing);
        self.wedding_cost.amount = Amount::syp(preset.wedding_cost);
        self.honeymoon.amount = Amount::syp(preset.honeymoon);
        self.additional_expenses.amount = Amount::syp(preset.additional_expenses);
        self.rent.amount = Amount::syp(preset.rent_monthly);
        self.rent_months = preset.rent_months;
    }

    /// Mutable access to a money term by kind
    ///
    /// Gold-denominated kinds have no money term and return `None`.
    pub fn term_mut(&mut self, kind: TermKind) -> Option<&mut CostTerm> {
        match kind {
            TermKind::HomeFurnishing => Some(&mut self.home_furnishing),
            TermKind::WeddingCost => Some(&mut self.wedding_cost),
            TermKind::Honeymoon => Some(&mut self.honeymoon),
            TermKind::AdditionalExpenses => Some(&mut self.additional_expenses),
            TermKind::Rent => Some(&mut self.rent),
            TermKind::Clothing => Some(&mut self.goldsmithing.clothing),
            TermKind::MahrAdvance | TermKind::MahrDeferred | TermKind::Goldsmithing => None,
        }
    }

    /// Shared access to a money term by kind
    pub fn term(&self, kind: TermKind) -> Option<&CostTerm> {
        match kind {
            TermKind::HomeFurnishing => Some(&self.home_furnishing),
            TermKind::WeddingCost => Some(&self.wedding_cost),
            TermKind::Honeymoon => Some(&self.honeymoon),
            TermKind::AdditionalExpenses => Some(&self.additional_expenses),
            TermKind::Rent => Some(&self.rent),
            TermKind::Clothing => Some(&self.goldsmithing.clothing),
            TermKind::MahrAdvance | TermKind::MahrDeferred | TermKind::Goldsmithing => None,
        }
    }
}

/// A persisted calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    /// Unique identifier
    pub id: CalculationId,

    /// Name given when saving
    pub name: String,

    /// Interface language the calculation was made in
    #[serde(default)]
    pub language: Language,

    /// Gold price, dollar rate and display currency at save time
    pub exchange: ExchangeContext,

    pub inputs: BudgetInputs,

    /// Currency the furnishing section displays its totals in
    #[serde(default)]
    pub furnishing_currency: Currency,

    /// Grand total in SYP when the calculation was last saved
    #[serde(default)]
    pub total_cost_syp: f64,

    /// When the calculation was created
    pub created_at: DateTime<Utc>,

    /// When the calculation was last modified
    pub updated_at: DateTime<Utc>,
}

impl Calculation {
    /// Create a new calculation record
    pub fn new(name: impl Into<String>, exchange: ExchangeContext, inputs: BudgetInputs) -> Self {
        let now = Utc::now();
        Self {
            id: CalculationId::new(),
            name: name.into(),
            language: Language::default(),
            exchange,
            inputs,
            furnishing_currency: Currency::Syp,
            total_cost_syp: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the record as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the record before it is stored
    pub fn validate(&self) -> Result<(), CalculationValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CalculationValidationError::EmptyName);
        }
        if name.chars().count() > 100 {
            return Err(CalculationValidationError::NameTooLong(name.chars().count()));
        }
        if self.exchange.validate().is_err() {
            return Err(CalculationValidationError::InvalidRates);
        }
        Ok(())
    }

    /// The listing row for this calculation
    pub fn summary(&self) -> SavedCalculation {
        SavedCalculation {
            id: self.id,
            name: self.name.clone(),
            date: self.updated_at,
            total_cost: self.total_cost_syp,
            currency: self.exchange.display_currency,
            dollar_rate: self.exchange.dollar_rate,
        }
    }
}

/// A row of the saved-calculations listing
///
/// `total_cost` is always SYP; `currency` is the display currency chosen
/// when the calculation was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCalculation {
    pub id: CalculationId,
    pub name: String,
    pub date: DateTime<Utc>,
    pub total_cost: f64,
    pub currency: Currency,
    pub dollar_rate: f64,
}

/// Validation errors for calculation records
#[derive(Debug, Clone, PartialEq)]
pub enum CalculationValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidRates,
}

impl std::fmt::Display for CalculationValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Calculation name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Calculation name too long ({} chars, max 100)", len)
            }
            Self::InvalidRates => write!(f, "Calculation has an invalid gold price or dollar rate"),
        }
    }
}

impl std::error::Error for CalculationValidationError {}
