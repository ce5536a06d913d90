//! Calculator session
//!
//! The calculator owns every input of one calculation. All edits go through
//! its setters; totals are recomputed only when `totals` is called.

use tracing::debug;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    Amount, BudgetInputs, BudgetMode, Calculation, CalculationId, CostTerm, Currency, ExchangeContext,
    FurnishingBook, FurnishingCategoryId, FurnishingItemId, Language, MahrInput, MahrView,
    TermKind, TermUpdate, Toggles,
};

use super::aggregate::{aggregate, AggregateInput, Totals};
use super::furnishing::{FurnishingManager, ItemDraft};

/// Which mahr quantity an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MahrPart {
    Advance,
    Deferred,
}

/// Editable state of one calculation
#[derive(Debug, Clone)]
pub struct Calculator {
    id: Option<CalculationId>,
    name: Option<String>,
    exchange: ExchangeContext,
    language: Language,
    inputs: BudgetInputs,
    furnishing: FurnishingManager,
}

impl Calculator {
    /// A fresh calculation seeded from the default preset
    pub fn new(exchange: ExchangeContext, language: Language) -> Self {
        Self::with_preset(exchange, language, BudgetMode::default())
    }

    /// A fresh calculation seeded from `mode`
    pub fn with_preset(exchange: ExchangeContext, language: Language, mode: BudgetMode) -> Self {
        let furnishing = FurnishingManager::seeded(
            mode,
            language,
            exchange.display_currency,
            exchange.dollar_rate,
        );
        let mut calculator = Self {
            id: None,
            name: None,
            exchange,
            language,
            inputs: BudgetInputs::from_preset(mode),
            furnishing,
        };
        calculator.sync_furnishing_term();
        calculator
    }

    /// Reopen a stored calculation with its furnishing records
    pub fn from_calculation(calculation: Calculation, book: FurnishingBook) -> Self {
        let mut furnishing = FurnishingManager::new(book, calculation.exchange.display_currency)
            .with_seeded_mode(calculation.inputs.budget_mode);
        furnishing.set_local_currency(calculation.furnishing_currency);

        let mut calculator = Self {
            id: Some(calculation.id),
            name: Some(calculation.name),
            exchange: calculation.exchange,
            language: calculation.language,
            inputs: calculation.inputs,
            furnishing,
        };
        calculator.sync_furnishing_term();
        calculator
    }

    /// Build the record to persist, keeping the id of a reopened calculation
    pub fn to_calculation(&self, name: &str) -> Calculation {
        let mut calculation = Calculation::new(name.trim(), self.exchange, self.inputs.clone());
        if let Some(id) = self.id {
            calculation.id = id;
        }
        calculation.language = self.language;
        calculation.furnishing_currency = self.furnishing.local_currency();
        calculation.total_cost_syp = self.totals().total_syp;
        calculation
    }

    /// Remember the identity a calculation was saved under
    pub fn mark_saved(&mut self, calculation: &Calculation) {
        self.id = Some(calculation.id);
        self.name = Some(calculation.name.clone());
    }

    pub fn id(&self) -> Option<CalculationId> {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn exchange(&self) -> &ExchangeContext {
        &self.exchange
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn inputs(&self) -> &BudgetInputs {
        &self.inputs
    }

    pub fn toggles(&self) -> Toggles {
        self.inputs.toggles
    }

    pub fn furnishing(&self) -> &FurnishingManager {
        &self.furnishing
    }

    // ----- exchange and presentation -----

    pub fn set_dollar_rate(&mut self, rate: f64) -> BudgetResult<()> {
        self.exchange = ExchangeContext::new(
            self.exchange.gold_price_per_gram,
            rate,
            self.exchange.display_currency,
        )?;
        self.furnishing.refresh_installments(rate);
        debug!(rate, "Dollar rate changed");
        Ok(())
    }

    pub fn set_gold_price(&mut self, price: f64) -> BudgetResult<()> {
        self.exchange = ExchangeContext::new(
            price,
            self.exchange.dollar_rate,
            self.exchange.display_currency,
        )?;
        debug!(price, "Gold price changed");
        Ok(())
    }

    /// Change the display currency; stored values are untouched
    pub fn set_display_currency(&mut self, currency: Currency) {
        self.exchange = self.exchange.with_display_currency(currency);
        self.furnishing.set_main_currency(currency);
        self.furnishing.refresh_installments(self.exchange.dollar_rate);
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_advance_paid(&mut self, paid: bool) {
        self.inputs.toggles.advance_paid = paid;
    }

    pub fn set_rent_enabled(&mut self, enabled: bool) {
        self.inputs.toggles.rent_enabled = enabled;
    }

    /// Switch to another preset
    ///
    /// Overwrites every preset value and reseeds the furnishing items.
    /// Selecting the current preset does nothing and returns `false`.
    pub fn apply_preset(&mut self, mode: BudgetMode) -> bool {
        if mode == self.inputs.budget_mode {
            return false;
        }

        self.inputs.overwrite_with_preset(mode);
        self.furnishing
            .apply_preset(mode, self.language, self.exchange.dollar_rate);
        self.sync_furnishing_term();
        debug!(%mode, "Applied budget preset");
        true
    }

    // ----- cost terms -----

    /// Set a money term's value in its current currency
    ///
    /// Returns `None` when the term is read-only, which is the case for the
    /// furnishing fallback while furnishing items exist.
    pub fn set_term_value(&mut self, kind: TermKind, value: f64) -> BudgetResult<Option<TermUpdate>> {
        let update = self.money_term(kind)?.set_value(value);
        log_update(kind, update);
        Ok(update)
    }

    /// Move a money term to another currency, converting its value
    pub fn set_term_currency(
        &mut self,
        kind: TermKind,
        currency: Currency,
    ) -> BudgetResult<Option<TermUpdate>> {
        let rate = self.exchange.dollar_rate;
        let update = self.money_term(kind)?.set_currency(currency, rate);
        log_update(kind, update);
        Ok(update)
    }

    /// Set a money term to an amount in its own currency
    ///
    /// Returns `None` when the term is read-only; its currency is left as it was.
    pub fn set_term_amount(&mut self, kind: TermKind, amount: Amount) -> BudgetResult<Option<TermUpdate>> {
        let term = self.money_term(kind)?;
        if !term.enabled {
            return Ok(None);
        }
        term.amount.currency = amount.currency;
        let update = term.set_value(amount.value);
        log_update(kind, update);
        Ok(update)
    }

    pub fn set_rent_months(&mut self, months: u32) {
        self.inputs.rent_months = months;
    }

    pub fn set_mahr_grams(&mut self, part: MahrPart, grams: f64) {
        let grams = if grams.is_finite() { grams.max(0.0) } else { 0.0 };
        self.mahr_mut(part).gold.grams = grams;
    }

    pub fn set_mahr_view(&mut self, part: MahrPart, view: MahrView) {
        self.mahr_mut(part).set_view(view);
    }

    /// Enter a mahr value in its active view; returns the resulting grams
    pub fn set_mahr_input(&mut self, part: MahrPart, value: f64) -> f64 {
        let ctx = self.exchange;
        let grams = self.mahr_mut(part).set_input(value, &ctx);
        debug!(?part, value, grams, "Mahr input converted to grams");
        grams
    }

    pub fn set_goldsmithing_grams(&mut self, grams: f64) {
        self.inputs.goldsmithing.set_gold_grams(grams);
    }

    pub fn set_goldsmithing_total_currency(&mut self, currency: Currency) {
        self.inputs.goldsmithing.set_total_currency(currency);
    }

    // ----- furnishing -----

    pub fn set_furnishing_currency(&mut self, currency: Currency) {
        self.furnishing.set_local_currency(currency);
    }

    pub fn add_furnishing_category(&mut self, name: &str) -> BudgetResult<FurnishingCategoryId> {
        self.furnishing.add_category(name)
    }

    pub fn add_furnishing_item(&mut self, draft: ItemDraft) -> BudgetResult<FurnishingItemId> {
        let id = self.furnishing.add_item(draft, self.exchange.dollar_rate)?;
        self.sync_furnishing_term();
        Ok(id)
    }

    pub fn update_furnishing_item(
        &mut self,
        id: FurnishingItemId,
        draft: ItemDraft,
    ) -> BudgetResult<()> {
        self.furnishing
            .update_item(id, draft, self.exchange.dollar_rate)?;
        self.sync_furnishing_term();
        Ok(())
    }

    pub fn delete_furnishing_item(&mut self, id: FurnishingItemId) -> BudgetResult<()> {
        self.furnishing.delete_item(id)?;
        self.sync_furnishing_term();
        Ok(())
    }

    // ----- results -----

    /// Totals in the display currency
    pub fn totals(&self) -> Totals {
        self.totals_in(self.exchange.display_currency)
    }

    /// Totals in any currency; the session itself is not changed
    pub fn totals_in(&self, target: Currency) -> Totals {
        let furnishing = self.furnishing.totals(self.exchange.dollar_rate);
        aggregate(
            AggregateInput::new(&self.inputs, furnishing),
            &self.exchange,
            self.inputs.toggles,
            target,
        )
    }

    fn money_term(&mut self, kind: TermKind) -> BudgetResult<&mut CostTerm> {
        self.inputs.term_mut(kind).ok_or_else(|| {
            BudgetError::Validation(format!("{} is measured in grams of gold", kind))
        })
    }

    fn mahr_mut(&mut self, part: MahrPart) -> &mut MahrInput {
        match part {
            MahrPart::Advance => &mut self.inputs.mahr_advance,
            MahrPart::Deferred => &mut self.inputs.mahr_deferred,
        }
    }

    /// The furnishing fallback is read-only while items provide the value
    fn sync_furnishing_term(&mut self) {
        self.inputs.home_furnishing.enabled = !self.furnishing.has_items();
    }
}

fn log_update(kind: TermKind, update: Option<TermUpdate>) {
    match update {
        Some(u) => debug!(term = %u.kind, amount = %u.amount, "Cost term updated"),
        None => debug!(term = %kind, "Cost term unchanged"),
    }
}
