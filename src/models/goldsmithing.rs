//! Goldsmithing and clothing section
//!
//! Used instead of the advance mahr when the advance has not been paid: the
//! capital goes to jewellery (grams of gold) and clothing (money).

use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::currency::{convert, format_currency, Currency, Language};
use super::exchange::ExchangeContext;
use super::mahr::GoldTerm;
use super::term::{CostTerm, TermKind};

/// Gold grams plus a clothing budget with its own currency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoldsmithingClothing {
    pub gold: GoldTerm,
    pub clothing: CostTerm,
    /// Currency the section total is shown in; display only
    #[serde(default)]
    pub total_currency: Currency,
}

impl Default for GoldsmithingClothing {
    fn default() -> Self {
        Self {
            gold: GoldTerm::new(0.0),
            clothing: CostTerm::new(TermKind::Clothing, Amount::zero()),
            total_currency: Currency::Syp,
        }
    }
}

/// SYP subtotals of the section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionTotals {
    pub gold_syp: f64,
    pub clothing_syp: f64,
}

impl SectionTotals {
    pub fn total_syp(&self) -> f64 {
        self.gold_syp + self.clothing_syp
    }
}

impl GoldsmithingClothing {
    pub fn new(grams: f64, clothing: Amount) -> Self {
        Self {
            gold: GoldTerm::new(grams),
            clothing: CostTerm::new(TermKind::Clothing, clothing),
            total_currency: clothing.currency,
        }
    }

    pub fn set_gold_grams(&mut self, grams: f64) {
        self.gold.grams = if grams.is_finite() { grams.max(0.0) } else { 0.0 };
    }

    /// Both parts normalized to SYP
    pub fn totals(&self, ctx: &ExchangeContext) -> SectionTotals {
        SectionTotals {
            gold_syp: self.gold.value_syp(ctx),
            clothing_syp: self.clothing.amount.to_syp(ctx.dollar_rate),
        }
    }

    /// Change the currency of the section total; stored values are untouched
    pub fn set_total_currency(&mut self, currency: Currency) {
        self.total_currency = currency;
    }

    /// The formatted section total in its selected currency
    pub fn format_total(&self, ctx: &ExchangeContext, language: Language) -> String {
        let total = convert(
            self.totals(ctx).total_syp(),
            Currency::Syp,
            self.total_currency,
            ctx.dollar_rate,
        );
        format_currency(total, self.total_currency, language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_normalize_to_syp() {
        let section = GoldsmithingClothing::new(20.0, Amount::usd(200.0));
        let totals = section.totals(&ExchangeContext::default());

        assert_eq!(totals.gold_syp, 20_000_000.0);
        assert_eq!(totals.clothing_syp, 3_000_000.0);
        assert_eq!(totals.total_syp(), 23_000_000.0);
    }

    #[test]
    fn test_total_currency_is_display_only() {
        let mut section = GoldsmithingClothing::new(3.0, Amount::syp(1_500_000.0));
        let ctx = ExchangeContext::default();
        assert_eq!(section.format_total(&ctx, Language::En), "4,500,000 SYP");

        section.set_total_currency(Currency::Usd);
        assert_eq!(section.format_total(&ctx, Language::En), "$300");
        assert_eq!(section.clothing.amount, Amount::syp(1_500_000.0));
    }

    #[test]
    fn test_clothing_currency_switch_converts() {
        let mut section = GoldsmithingClothing::new(0.0, Amount::syp(1_500_000.0));
        section.clothing.set_currency(Currency::Usd, 15_000.0);
        assert_eq!(section.clothing.amount, Amount::usd(100.0));
    }

    #[test]
    fn test_set_gold_grams_rejects_negative() {
        let mut section = GoldsmithingClothing::default();
        section.set_gold_grams(-4.0);
        assert_eq!(section.gold.grams, 0.0);
    }
}
