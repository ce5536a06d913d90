//! Exchange context and calculation toggles
//!
//! Every monetary computation takes an `ExchangeContext` snapshot by value.
//! Changing a rate means building a new snapshot, never mutating one that a
//! computation is already using.

use serde::{Deserialize, Serialize};

use super::currency::Currency;
use crate::error::{BudgetError, BudgetResult};

/// Default gold price per gram in SYP
pub const DEFAULT_GOLD_PRICE: f64 = 1_000_000.0;

/// Default SYP per USD
pub const DEFAULT_DOLLAR_RATE: f64 = 15_000.0;

/// Gold price, dollar rate and display currency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeContext {
    /// Price of one gram of gold in SYP
    pub gold_price_per_gram: f64,
    /// SYP per one USD
    pub dollar_rate: f64,
    /// Currency totals are presented in
    pub display_currency: Currency,
}

impl Default for ExchangeContext {
    fn default() -> Self {
        Self {
            gold_price_per_gram: DEFAULT_GOLD_PRICE,
            dollar_rate: DEFAULT_DOLLAR_RATE,
            display_currency: Currency::Syp,
        }
    }
}

impl ExchangeContext {
    /// Create a validated context
    pub fn new(
        gold_price_per_gram: f64,
        dollar_rate: f64,
        display_currency: Currency,
    ) -> BudgetResult<Self> {
        let ctx = Self {
            gold_price_per_gram,
            dollar_rate,
            display_currency,
        };
        ctx.validate()?;
        Ok(ctx)
    }

    /// Check that both rates are usable
    pub fn validate(&self) -> BudgetResult<()> {
        if !self.dollar_rate.is_finite() || self.dollar_rate <= 0.0 {
            return Err(BudgetError::Validation(format!(
                "Dollar rate must be a positive number, got {}",
                self.dollar_rate
            )));
        }
        if !self.gold_price_per_gram.is_finite() || self.gold_price_per_gram < 0.0 {
            return Err(BudgetError::Validation(format!(
                "Gold price must be zero or positive, got {}",
                self.gold_price_per_gram
            )));
        }
        Ok(())
    }

    /// A copy of this snapshot presenting in another currency
    pub fn with_display_currency(self, display_currency: Currency) -> Self {
        Self {
            display_currency,
            ..self
        }
    }

    /// SYP value of a gold quantity
    pub fn gold_value_syp(&self, grams: f64) -> f64 {
        grams * self.gold_price_per_gram
    }
}

/// Switches that decide which terms enter the total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggles {
    /// The advance mahr has been paid and belongs in the total
    pub advance_paid: bool,
    /// A home is rented and rent months are paid up front
    pub rent_enabled: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            advance_paid: true,
            rent_enabled: true,
        }
    }
}
