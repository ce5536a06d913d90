//! Furnishing manager
//!
//! Owns the categories and items of one calculation, validates edits, keeps
//! installment amounts current and computes per-category totals. Totals are
//! always accumulated in SYP and only converted for display.

use tracing::debug;

use crate::error::{BudgetError, BudgetResult};
use crate::models::currency::{convert, Currency, Language};
use crate::models::furnishing::{default_items, monthly_installment};
use crate::models::{
    Amount, BudgetMode, FurnishingBook, FurnishingCategory, FurnishingCategoryId, FurnishingItem,
    FurnishingItemId,
};

/// Input for creating or editing an item
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub category_id: Option<FurnishingCategoryId>,
    pub name: String,
    pub price: Amount,
    /// `Some(months)` buys the item on installments
    pub installment_months: Option<u32>,
}

impl ItemDraft {
    pub fn new(category_id: FurnishingCategoryId, name: impl Into<String>, price: Amount) -> Self {
        Self {
            category_id: Some(category_id),
            name: name.into(),
            price,
            installment_months: None,
        }
    }

    pub fn installments(mut self, months: u32) -> Self {
        self.installment_months = Some(months);
        self
    }

    fn validate(&self) -> BudgetResult<()> {
        if self.name.trim().is_empty() {
            return Err(BudgetError::Validation("Item name cannot be empty".into()));
        }
        if !self.price.value.is_finite() || self.price.value <= 0.0 {
            return Err(BudgetError::Validation(
                "Item price must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Totals of one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: FurnishingCategory,
    pub item_count: usize,
    /// Cash prices plus installment down payments
    pub immediate_syp: f64,
    /// Installment balance still to be paid
    pub remaining_syp: f64,
}

/// Totals over all items
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FurnishingTotals {
    pub item_count: usize,
    pub immediate_syp: f64,
    pub remaining_syp: f64,
}

/// Editable furnishing state of one calculation
#[derive(Debug, Clone, PartialEq)]
pub struct FurnishingManager {
    book: FurnishingBook,
    /// Currency new items default to and installments are expressed in
    main_currency: Currency,
    /// Currency the section's totals are displayed in
    local_currency: Currency,
    seeded_mode: Option<BudgetMode>,
}

impl FurnishingManager {
    /// Wrap an existing book; no preset is considered seeded
    pub fn new(book: FurnishingBook, main_currency: Currency) -> Self {
        Self {
            book,
            main_currency,
            local_currency: main_currency,
            seeded_mode: None,
        }
    }

    /// Default categories plus the first items of a preset
    pub fn seeded(mode: BudgetMode, language: Language, main_currency: Currency, rate: f64) -> Self {
        let mut manager = Self::new(FurnishingBook::with_default_categories(language), main_currency);
        manager.apply_preset(mode, language, rate);
        manager
    }

    /// Mark a loaded book as belonging to `mode` so reopening it does not reseed
    pub fn with_seeded_mode(mut self, mode: BudgetMode) -> Self {
        self.seeded_mode = Some(mode);
        self
    }

    pub fn book(&self) -> &FurnishingBook {
        &self.book
    }

    pub fn into_book(self) -> FurnishingBook {
        self.book
    }

    pub fn categories(&self) -> &[FurnishingCategory] {
        &self.book.categories
    }

    pub fn items(&self) -> &[FurnishingItem] {
        &self.book.items
    }

    pub fn has_items(&self) -> bool {
        !self.book.items.is_empty()
    }

    pub fn main_currency(&self) -> Currency {
        self.main_currency
    }

    pub fn local_currency(&self) -> Currency {
        self.local_currency
    }

    /// Change the currency new items default to
    pub fn set_main_currency(&mut self, currency: Currency) {
        self.main_currency = currency;
    }

    /// Change the currency the section totals are shown in
    pub fn set_local_currency(&mut self, currency: Currency) {
        self.local_currency = currency;
    }

    /// Replace all items with a preset's defaults
    ///
    /// Only a transition reseeds: applying the preset that is already seeded
    /// returns `false` and keeps the user's items.
    pub fn apply_preset(&mut self, mode: BudgetMode, language: Language, rate: f64) -> bool {
        if self.seeded_mode == Some(mode) {
            return false;
        }

        self.book.items = default_items(mode, language, self.main_currency, rate);
        self.seeded_mode = Some(mode);
        debug!(%mode, items = self.book.items.len(), "Reseeded furnishing items");
        true
    }

    /// Add a category
    pub fn add_category(&mut self, name: &str) -> BudgetResult<FurnishingCategoryId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BudgetError::Validation("Category name cannot be empty".into()));
        }
        if self
            .book
            .categories
            .iter()
            .any(|c| c.name.to_lowercase() == name.to_lowercase())
        {
            return Err(BudgetError::Duplicate {
                entity_type: "Furnishing category",
                identifier: name.to_string(),
            });
        }

        let category = FurnishingCategory::new(name);
        let id = category.id;
        self.book.categories.push(category);
        Ok(id)
    }

    /// Add an item; new items are listed first
    pub fn add_item(&mut self, draft: ItemDraft, rate: f64) -> BudgetResult<FurnishingItemId> {
        let category_id = draft.category_id.ok_or_else(|| {
            BudgetError::Validation("Select a category for the item".into())
        })?;
        self.require_category(category_id)?;
        draft.validate()?;

        let mut item = FurnishingItem::new(category_id, draft.name.trim(), draft.price);
        if let Some(months) = draft.installment_months {
            item = item.with_installments(months);
        }
        item.monthly_installment = installment_for(&item, self.main_currency, rate);

        let id = item.id;
        debug!(item = %id, price = %item.price_amount(), "Added furnishing item");
        self.book.items.insert(0, item);
        Ok(id)
    }

    /// Replace an item's details, keeping its id
    ///
    /// A draft without a category keeps the item's current category.
    pub fn update_item(
        &mut self,
        id: FurnishingItemId,
        draft: ItemDraft,
        rate: f64,
    ) -> BudgetResult<()> {
        draft.validate()?;
        if let Some(category_id) = draft.category_id {
            self.require_category(category_id)?;
        }

        let main_currency = self.main_currency;
        let item = self
            .book
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| BudgetError::item_not_found(id.to_string()))?;

        if let Some(category_id) = draft.category_id {
            item.category_id = category_id;
        }
        item.name = draft.name.trim().to_string();
        item.price = draft.price.value;
        item.currency = draft.price.currency;
        match draft.installment_months {
            Some(months) => {
                item.is_installment = true;
                item.installment_months = months;
            }
            None => item.is_installment = false,
        }
        item.monthly_installment = installment_for(item, main_currency, rate);
        Ok(())
    }

    /// Remove an item
    pub fn delete_item(&mut self, id: FurnishingItemId) -> BudgetResult<FurnishingItem> {
        let index = self
            .book
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| BudgetError::item_not_found(id.to_string()))?;
        Ok(self.book.items.remove(index))
    }

    /// Recompute every cached monthly installment, e.g. after a rate change
    pub fn refresh_installments(&mut self, rate: f64) {
        let main_currency = self.main_currency;
        for item in &mut self.book.items {
            item.monthly_installment = installment_for(item, main_currency, rate);
        }
    }

    /// Per-category totals in SYP, in category order
    ///
    /// Items whose category no longer exists are not counted.
    pub fn category_totals(&self, rate: f64) -> Vec<CategoryTotal> {
        self.book
            .categories
            .iter()
            .map(|category| {
                let mut total = CategoryTotal {
                    category: category.clone(),
                    item_count: 0,
                    immediate_syp: 0.0,
                    remaining_syp: 0.0,
                };
                for item in self.book.items_in(category.id) {
                    let c = item.contribution(rate);
                    total.item_count += 1;
                    total.immediate_syp += c.immediate_syp;
                    total.remaining_syp += c.remaining_syp;
                }
                total
            })
            .collect()
    }

    /// Grand totals in SYP
    pub fn totals(&self, rate: f64) -> FurnishingTotals {
        self.category_totals(rate)
            .iter()
            .fold(FurnishingTotals::default(), |acc, t| FurnishingTotals {
                item_count: acc.item_count + t.item_count,
                immediate_syp: acc.immediate_syp + t.immediate_syp,
                remaining_syp: acc.remaining_syp + t.remaining_syp,
            })
    }

    /// A category total shown in the local currency; USD is rounded to whole dollars
    pub fn display_value(&self, amount_syp: f64, rate: f64) -> f64 {
        match self.local_currency {
            Currency::Usd => convert(amount_syp, Currency::Syp, Currency::Usd, rate).round(),
            Currency::Syp => amount_syp,
        }
    }

    /// Section total in the local currency, falling back to `fallback` without items
    pub fn display_total(&self, fallback: Amount, rate: f64) -> f64 {
        if self.has_items() {
            self.category_totals(rate)
                .iter()
                .map(|t| self.display_value(t.immediate_syp, rate))
                .sum()
        } else {
            fallback.value_in(self.local_currency, rate)
        }
    }

    fn require_category(&self, id: FurnishingCategoryId) -> BudgetResult<()> {
        self.book
            .category(id)
            .map(|_| ())
            .ok_or_else(|| BudgetError::category_not_found(id.to_string()))
    }
}

fn installment_for(item: &FurnishingItem, main_currency: Currency, rate: f64) -> f64 {
    if item.is_installment {
        monthly_installment(item.price_amount(), item.installment_months, main_currency, rate)
    } else {
        0.0
    }
}
