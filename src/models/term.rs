//! Money-denominated cost terms
//!
//! Each term keeps its own currency tag, independent of the global display
//! currency, so switching the display never reinterprets what was typed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::amount::Amount;
use super::currency::{Currency, Language};
use crate::error::BudgetError;

/// Identifies a budget line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermKind {
    MahrAdvance,
    MahrDeferred,
    Goldsmithing,
    Clothing,
    HomeFurnishing,
    WeddingCost,
    Honeymoon,
    AdditionalExpenses,
    Rent,
}

impl TermKind {
    /// Terms whose amount is entered as money (as opposed to gold grams)
    pub const MONEY_TERMS: [TermKind; 6] = [
        TermKind::HomeFurnishing,
        TermKind::WeddingCost,
        TermKind::Honeymoon,
        TermKind::AdditionalExpenses,
        TermKind::Rent,
        TermKind::Clothing,
    ];

    /// Localized label
    pub fn label(self, language: Language) -> &'static str {
        match self {
            TermKind::MahrAdvance => language.pick("المهر المقدم", "Mahr (Advance)"),
            TermKind::MahrDeferred => language.pick("المهر المؤخر", "Mahr (Deferred)"),
            TermKind::Goldsmithing => language.pick("المصاغ والملابس", "Goldsmithing & Clothing"),
            TermKind::Clothing => language.pick("تكلفة الملابس", "Clothing Cost"),
            TermKind::HomeFurnishing => language.pick("تجهيز المنزل", "Home Furnishing"),
            TermKind::WeddingCost => language.pick("تكاليف الزفاف", "Wedding Cost"),
            TermKind::Honeymoon => language.pick("شهر العسل", "Honeymoon"),
            TermKind::AdditionalExpenses => language.pick("مصاريف إضافية", "Additional Expenses"),
            TermKind::Rent => language.pick("الإيجار", "Rent"),
        }
    }

    /// Stable identifier used in exports and on the command line
    pub const fn key(self) -> &'static str {
        match self {
            TermKind::MahrAdvance => "mahr_advance",
            TermKind::MahrDeferred => "mahr_deferred",
            TermKind::Goldsmithing => "goldsmithing",
            TermKind::Clothing => "clothing",
            TermKind::HomeFurnishing => "home_furnishing",
            TermKind::WeddingCost => "wedding_cost",
            TermKind::Honeymoon => "honeymoon",
            TermKind::AdditionalExpenses => "additional_expenses",
            TermKind::Rent => "rent",
        }
    }
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TermKind {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "mahr_advance" | "advance" => Ok(TermKind::MahrAdvance),
            "mahr_deferred" | "deferred" => Ok(TermKind::MahrDeferred),
            "goldsmithing" => Ok(TermKind::Goldsmithing),
            "clothing" => Ok(TermKind::Clothing),
            "home_furnishing" | "furnishing" => Ok(TermKind::HomeFurnishing),
            "wedding_cost" | "wedding" => Ok(TermKind::WeddingCost),
            "honeymoon" => Ok(TermKind::Honeymoon),
            "additional_expenses" | "additional" => Ok(TermKind::AdditionalExpenses),
            "rent" => Ok(TermKind::Rent),
            other => Err(BudgetError::Validation(format!("Unknown cost term: {}", other))),
        }
    }
}

/// Notification emitted when a term's value or currency changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermUpdate {
    pub kind: TermKind,
    pub amount: Amount,
}

/// One money-denominated budget line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostTerm {
    pub kind: TermKind,
    pub amount: Amount,
    /// Disabled terms are computed elsewhere and ignore edits
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl CostTerm {
    /// Create an enabled term
    pub fn new(kind: TermKind, amount: Amount) -> Self {
        Self {
            kind,
            amount,
            enabled: true,
        }
    }

    /// The value in the term's own currency
    pub fn value(&self) -> f64 {
        self.amount.value
    }

    /// The term's own currency
    pub fn currency(&self) -> Currency {
        self.amount.currency
    }

    /// Store a raw value in the currently selected currency
    ///
    /// Negative and non-finite input is stored as zero.
    pub fn set_value(&mut self, value: f64) -> Option<TermUpdate> {
        if !self.enabled {
            return None;
        }

        self.amount.value = if value.is_finite() { value.max(0.0) } else { 0.0 };
        Some(self.update())
    }

    /// Switch the term to another currency, converting the stored value
    ///
    /// Selecting the active currency does nothing. A zero value only changes
    /// the currency tag.
    pub fn set_currency(&mut self, currency: Currency, rate: f64) -> Option<TermUpdate> {
        if !self.enabled || currency == self.amount.currency {
            return None;
        }

        self.amount = if self.amount.is_zero() {
            Amount::new(0.0, currency)
        } else {
            self.amount.redenominate(currency, rate)
        };
        Some(self.update())
    }

    fn update(&self) -> TermUpdate {
        TermUpdate {
            kind: self.kind,
            amount: self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: f64 = 15000.0;

    #[test]
    fn test_set_value_keeps_currency() {
        let mut term = CostTerm::new(TermKind::Honeymoon, Amount::usd(100.0));
        let update = term.set_value(250.0).unwrap();

        assert_eq!(update.kind, TermKind::Honeymoon);
        assert_eq!(update.amount, Amount::usd(250.0));
        assert_eq!(term.currency(), Currency::Usd);
    }

    #[test]
    fn test_set_value_coerces_bad_input() {
        let mut term = CostTerm::new(TermKind::WeddingCost, Amount::syp(5.0));
        term.set_value(f64::NAN);
        assert_eq!(term.value(), 0.0);
        term.set_value(-3.0);
        assert_eq!(term.value(), 0.0);
    }

    #[test]
    fn test_set_currency_converts() {
        let mut term = CostTerm::new(TermKind::WeddingCost, Amount::syp(25_500_000.0));
        let update = term.set_currency(Currency::Usd, RATE).unwrap();

        assert_eq!(update.amount, Amount::usd(1700.0));
        assert_eq!(term.amount, Amount::usd(1700.0));
    }

    #[test]
    fn test_set_currency_is_idempotent() {
        let mut term = CostTerm::new(TermKind::WeddingCost, Amount::syp(1_000_000.0));
        assert!(term.set_currency(Currency::Syp, RATE).is_none());
        assert_eq!(term.amount, Amount::syp(1_000_000.0));

        term.set_currency(Currency::Usd, RATE);
        let after_first = term.amount;
        assert!(term.set_currency(Currency::Usd, RATE).is_none());
        assert_eq!(term.amount, after_first);
    }

    #[test]
    fn test_zero_value_only_changes_tag() {
        let mut term = CostTerm::new(TermKind::Rent, Amount::syp(0.0));
        let update = term.set_currency(Currency::Usd, RATE).unwrap();
        assert_eq!(update.amount, Amount::usd(0.0));
    }

    #[test]
    fn test_round_trip_within_rounding() {
        let mut term = CostTerm::new(TermKind::AdditionalExpenses, Amount::syp(7_500_001.0));
        term.set_currency(Currency::Usd, RATE);
        term.set_currency(Currency::Syp, RATE);
        assert!((term.value() - 7_500_001.0).abs() <= RATE * 0.005 + 1.0);
    }

    #[test]
    fn test_disabled_term_ignores_edits() {
        let mut term = CostTerm::new(TermKind::HomeFurnishing, Amount::syp(10.0));
        term.enabled = false;

        assert!(term.set_value(99.0).is_none());
        assert!(term.set_currency(Currency::Usd, RATE).is_none());
        assert_eq!(term.amount, Amount::syp(10.0));
    }

    #[test]
    fn test_term_kind_parse_and_labels() {
        assert_eq!("wedding".parse::<TermKind>().unwrap(), TermKind::WeddingCost);
        assert_eq!("home-furnishing".parse::<TermKind>().unwrap(), TermKind::HomeFurnishing);
        assert!("venue".parse::<TermKind>().is_err());
        assert_eq!(TermKind::Rent.label(Language::En), "Rent");
        assert_eq!(TermKind::Rent.label(Language::Ar), "الإيجار");
    }
}
