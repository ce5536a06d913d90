//! Gold-denominated mahr input
//!
//! The mahr is always stored as grams of gold. The gold, USD and SYP views
//! only change how that quantity is shown and entered.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::currency::{finite_or_zero, format_currency, Currency, Language};
use super::exchange::ExchangeContext;
use crate::error::BudgetError;

/// A quantity of gold in grams
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoldTerm {
    pub grams: f64,
}

impl GoldTerm {
    pub const fn new(grams: f64) -> Self {
        Self { grams }
    }

    /// SYP value at the context's gold price, coerced to a finite number
    pub fn value_syp(&self, ctx: &ExchangeContext) -> f64 {
        finite_or_zero(ctx.gold_value_syp(self.grams))
    }

    /// Grams with two decimals and a localized unit
    pub fn format_grams(&self, language: Language) -> String {
        format!(
            "{:.2} {}",
            finite_or_zero(self.grams),
            language.pick("غرام", "grams")
        )
    }
}

/// Payment method the mahr is viewed and entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MahrView {
    #[default]
    Gold,
    Usd,
    Syp,
}

impl FromStr for MahrView {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gold" | "g" | "grams" => Ok(MahrView::Gold),
            "usd" | "$" => Ok(MahrView::Usd),
            "syp" => Ok(MahrView::Syp),
            other => Err(BudgetError::Validation(format!(
                "Unknown mahr payment method: {} (expected gold, usd or syp)",
                other
            ))),
        }
    }
}

impl fmt::Display for MahrView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MahrView::Gold => "gold",
            MahrView::Usd => "usd",
            MahrView::Syp => "syp",
        })
    }
}

/// The same mahr quantity expressed three ways
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MahrEquivalents {
    pub grams: f64,
    pub syp: f64,
    pub usd: f64,
}

/// Mahr input state: the gold quantity plus the active view
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MahrInput {
    pub gold: GoldTerm,
    #[serde(default)]
    pub view: MahrView,
}

impl MahrInput {
    pub fn new(grams: f64) -> Self {
        Self {
            gold: GoldTerm::new(grams),
            view: MahrView::Gold,
        }
    }

    pub fn grams(&self) -> f64 {
        self.gold.grams
    }

    /// Switch the view; the stored grams never change
    pub fn set_view(&mut self, view: MahrView) {
        self.view = view;
    }

    /// The number shown in the input for the active view
    pub fn display_value(&self, ctx: &ExchangeContext) -> f64 {
        let grams = self.gold.grams;
        let value = match self.view {
            MahrView::Gold => grams,
            MahrView::Usd => grams * ctx.gold_price_per_gram / ctx.dollar_rate,
            MahrView::Syp => grams * ctx.gold_price_per_gram,
        };
        finite_or_zero(value)
    }

    /// Accept a number typed in the active view and update the grams
    ///
    /// Returns the new gram quantity. A zero gold price yields zero grams.
    pub fn set_input(&mut self, input: f64, ctx: &ExchangeContext) -> f64 {
        let input = finite_or_zero(input).max(0.0);
        let grams = match self.view {
            MahrView::Gold => input,
            MahrView::Usd => input * ctx.dollar_rate / ctx.gold_price_per_gram,
            MahrView::Syp => input / ctx.gold_price_per_gram,
        };
        self.gold.grams = finite_or_zero(grams);
        self.gold.grams
    }

    /// Grams, SYP and USD values of the stored quantity
    pub fn equivalents(&self, ctx: &ExchangeContext) -> MahrEquivalents {
        let syp = self.gold.value_syp(ctx);
        MahrEquivalents {
            grams: self.gold.grams,
            syp,
            usd: finite_or_zero(syp / ctx.dollar_rate),
        }
    }

    /// Formatted equivalents for every view other than the active one
    pub fn equivalent_lines(&self, ctx: &ExchangeContext, language: Language) -> Vec<String> {
        let eq = self.equivalents(ctx);
        let mut lines = Vec::with_capacity(2);

        if self.view != MahrView::Gold {
            lines.push(format!("= {}", self.gold.format_grams(language)));
        }
        if self.view != MahrView::Syp {
            lines.push(format!("= {}", format_currency(eq.syp, Currency::Syp, language)));
        }
        if self.view != MahrView::Usd {
            lines.push(format!("= {}", format_currency(eq.usd, Currency::Usd, language)));
        }

        lines
    }
}
