//! Home furnishing categories and items
//!
//! Items belong to exactly one category. Installment items only count half
//! their price as a down payment; the other half is tracked separately as
//! remaining installments.

use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::currency::{convert, finite_or_zero, Currency, Language};
use super::ids::{FurnishingCategoryId, FurnishingItemId};
use super::preset::BudgetMode;

/// Share of an installment item's price paid up front
pub const DOWN_PAYMENT_SHARE: f64 = 0.5;

/// Default number of installment months for new items
pub const DEFAULT_INSTALLMENT_MONTHS: u32 = 12;

/// Number of preset items seeded when a budget mode is selected
pub const SEEDED_ITEMS_PER_PRESET: usize = 3;

/// A furnishing category (kitchen, bedroom, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnishingCategory {
    pub id: FurnishingCategoryId,
    pub name: String,
}

impl FurnishingCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: FurnishingCategoryId::new(),
            name: name.into(),
        }
    }
}

/// A single furnishing purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnishingItem {
    pub id: FurnishingItemId,
    pub category_id: FurnishingCategoryId,
    pub name: String,
    pub price: f64,
    pub currency: Currency,
    #[serde(default)]
    pub is_installment: bool,
    /// Cached monthly installment in the calculator's main currency
    #[serde(default)]
    pub monthly_installment: f64,
    #[serde(default = "default_installment_months")]
    pub installment_months: u32,
}

fn default_installment_months() -> u32 {
    DEFAULT_INSTALLMENT_MONTHS
}

/// How much of an item enters the total now and how much is deferred, in SYP
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemContribution {
    pub immediate_syp: f64,
    pub remaining_syp: f64,
}

impl FurnishingItem {
    /// Create a cash item
    pub fn new(
        category_id: FurnishingCategoryId,
        name: impl Into<String>,
        price: Amount,
    ) -> Self {
        Self {
            id: FurnishingItemId::new(),
            category_id,
            name: name.into(),
            price: price.value,
            currency: price.currency,
            is_installment: false,
            monthly_installment: 0.0,
            installment_months: DEFAULT_INSTALLMENT_MONTHS,
        }
    }

    /// Mark the item as bought on installments over `months`
    pub fn with_installments(mut self, months: u32) -> Self {
        self.is_installment = true;
        self.installment_months = months;
        self
    }

    pub fn price_amount(&self) -> Amount {
        Amount::new(self.price, self.currency)
    }

    /// Price normalized to SYP with the item's own currency
    pub fn price_syp(&self, rate: f64) -> f64 {
        self.price_amount().to_syp(rate)
    }

    /// Split the price into the part counted now and the deferred part
    pub fn contribution(&self, rate: f64) -> ItemContribution {
        let price = self.price_syp(rate);
        if self.is_installment {
            let down_payment = price * DOWN_PAYMENT_SHARE;
            ItemContribution {
                immediate_syp: down_payment,
                remaining_syp: price - down_payment,
            }
        } else {
            ItemContribution {
                immediate_syp: price,
                remaining_syp: 0.0,
            }
        }
    }
}

/// Categories and items belonging to one calculation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FurnishingBook {
    #[serde(default)]
    pub categories: Vec<FurnishingCategory>,
    #[serde(default)]
    pub items: Vec<FurnishingItem>,
}

impl FurnishingBook {
    /// The built-in categories and no items
    pub fn with_default_categories(language: Language) -> Self {
        Self {
            categories: default_categories(language),
            items: Vec::new(),
        }
    }

    pub fn category(&self, id: FurnishingCategoryId) -> Option<&FurnishingCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Look a category up by id (short or full) or by case-insensitive name
    pub fn find_category(&self, query: &str) -> Option<&FurnishingCategory> {
        let query = query.trim();
        self.categories
            .iter()
            .find(|c| c.name.to_lowercase() == query.to_lowercase())
            .or_else(|| self.categories.iter().find(|c| c.id.matches(query)))
    }

    /// Look an item up by id (short or full)
    pub fn find_item(&self, query: &str) -> Option<&FurnishingItem> {
        self.items.iter().find(|i| i.id.matches(query))
    }

    pub fn items_in(
        &self,
        category_id: FurnishingCategoryId,
    ) -> impl Iterator<Item = &FurnishingItem> + '_ {
        self.items.iter().filter(move |i| i.category_id == category_id)
    }
}

/// Monthly payment for the financed half of a price, rounded to whole units
///
/// The price is converted to `main_currency` first. Zero months yields zero.
pub fn monthly_installment(
    price: Amount,
    months: u32,
    main_currency: Currency,
    rate: f64,
) -> f64 {
    if months == 0 {
        return 0.0;
    }
    let converted = convert(price.value, price.currency, main_currency, rate);
    finite_or_zero((converted * (1.0 - DOWN_PAYMENT_SHARE) / f64::from(months)).round())
}

/// Fixed id of a built-in category; the number shows in the short form
pub const fn default_category_id(n: u128) -> FurnishingCategoryId {
    FurnishingCategoryId::from_u128((0xfc00_0000 + n) << 96)
}

struct DefaultCategory {
    id: u128,
    ar: &'static str,
    en: &'static str,
}

const DEFAULT_CATEGORIES: [DefaultCategory; 5] = [
    DefaultCategory { id: 1, ar: "المطبخ", en: "Kitchen" },
    DefaultCategory { id: 2, ar: "غرفة النوم", en: "Bedroom" },
    DefaultCategory { id: 3, ar: "غرفة الجلوس", en: "Living Room" },
    DefaultCategory { id: 4, ar: "الأجهزة الكهربائية", en: "Electrical Appliances" },
    DefaultCategory { id: 5, ar: "الحمام", en: "Bathroom" },
];

struct DefaultItem {
    category: u128,
    ar: &'static str,
    en: &'static str,
    price: f64,
    installment_months: Option<u32>,
}

const ECONOMIC_ITEMS: [DefaultItem; 5] = [
    DefaultItem { category: 2, ar: "غرفة نوم", en: "Bedroom set", price: 12_000_000.0, installment_months: None },
    DefaultItem { category: 4, ar: "ثلاجة", en: "Refrigerator", price: 6_000_000.0, installment_months: Some(12) },
    DefaultItem { category: 1, ar: "أدوات مطبخ", en: "Kitchen utensils", price: 2_500_000.0, installment_months: None },
    DefaultItem { category: 3, ar: "كنبايات", en: "Sofa set", price: 5_000_000.0, installment_months: None },
    DefaultItem { category: 4, ar: "غسالة", en: "Washing machine", price: 4_500_000.0, installment_months: None },
];

const MEDIUM_ITEMS: [DefaultItem; 6] = [
    DefaultItem { category: 2, ar: "غرفة نوم", en: "Bedroom set", price: 25_000_000.0, installment_months: None },
    DefaultItem { category: 4, ar: "ثلاجة", en: "Refrigerator", price: 10_000_000.0, installment_months: Some(12) },
    DefaultItem { category: 3, ar: "طقم كنب", en: "Sofa set", price: 12_000_000.0, installment_months: None },
    DefaultItem { category: 1, ar: "أدوات مطبخ", en: "Kitchen utensils", price: 4_000_000.0, installment_months: None },
    DefaultItem { category: 4, ar: "غسالة", en: "Washing machine", price: 7_000_000.0, installment_months: Some(10) },
    DefaultItem { category: 5, ar: "سخان ماء", en: "Water heater", price: 3_000_000.0, installment_months: None },
];

const LUXURY_ITEMS: [DefaultItem; 6] = [
    DefaultItem { category: 2, ar: "غرفة نوم فاخرة", en: "Luxury bedroom set", price: 45_000_000.0, installment_months: None },
    DefaultItem { category: 3, ar: "صالون", en: "Salon furniture", price: 30_000_000.0, installment_months: Some(18) },
    DefaultItem { category: 4, ar: "ثلاجة كبيرة", en: "Large refrigerator", price: 18_000_000.0, installment_months: None },
    DefaultItem { category: 1, ar: "مطبخ مجهز", en: "Fitted kitchen", price: 25_000_000.0, installment_months: Some(12) },
    DefaultItem { category: 4, ar: "غسالة أوتوماتيك", en: "Automatic washer", price: 12_000_000.0, installment_months: None },
    DefaultItem { category: 5, ar: "أطقم حمام", en: "Bathroom fittings", price: 8_000_000.0, installment_months: None },
];

/// The built-in categories in the given language
pub fn default_categories(language: Language) -> Vec<FurnishingCategory> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|c| FurnishingCategory {
            id: default_category_id(c.id),
            name: language.pick(c.ar, c.en).to_string(),
        })
        .collect()
}

/// The items seeded for a budget mode, priced in SYP
///
/// Only the first `SEEDED_ITEMS_PER_PRESET` entries of the preset list are
/// used. Every call returns fresh item ids.
pub fn default_items(mode: BudgetMode, language: Language, main_currency: Currency, rate: f64) -> Vec<FurnishingItem> {
    let source: &[DefaultItem] = match mode {
        BudgetMode::Economic => &ECONOMIC_ITEMS,
        BudgetMode::Medium => &MEDIUM_ITEMS,
        BudgetMode::Luxury => &LUXURY_ITEMS,
    };

    source
        .iter()
        .take(SEEDED_ITEMS_PER_PRESET)
        .map(|d| {
            let mut item = FurnishingItem::new(
                default_category_id(d.category),
                language.pick(d.ar, d.en),
                Amount::syp(d.price),
            );
            if let Some(months) = d.installment_months {
                item = item.with_installments(months);
                item.monthly_installment =
                    monthly_installment(item.price_amount(), months, main_currency, rate);
            }
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: f64 = 15_000.0;

    #[test]
    fn test_cash_item_counts_full_price() {
        let item = FurnishingItem::new(FurnishingCategoryId::new(), "Table", Amount::usd(100.0));
        let c = item.contribution(RATE);
        assert_eq!(c.immediate_syp, 1_500_000.0);
        assert_eq!(c.remaining_syp, 0.0);
    }

    #[test]
    fn test_installment_item_splits_in_half() {
        let item = FurnishingItem::new(FurnishingCategoryId::new(), "Fridge", Amount::syp(10_000_000.0))
            .with_installments(12);
        let c = item.contribution(RATE);
        assert_eq!(c.immediate_syp, 5_000_000.0);
        assert_eq!(c.remaining_syp, 5_000_000.0);
    }

    #[test]
    fn test_monthly_installment() {
        assert_eq!(
            monthly_installment(Amount::syp(10_000_000.0), 12, Currency::Syp, RATE),
            416_667.0
        );
        assert_eq!(monthly_installment(Amount::usd(1_200.0), 12, Currency::Usd, RATE), 50.0);
        assert_eq!(
            monthly_installment(Amount::usd(1_200.0), 10, Currency::Syp, RATE),
            900_000.0
        );
        assert_eq!(monthly_installment(Amount::syp(1_000.0), 0, Currency::Syp, RATE), 0.0);
    }

    #[test]
    fn test_default_items_are_sliced_and_fresh() {
        for mode in BudgetMode::ALL {
            let first = default_items(mode, Language::En, Currency::Syp, RATE);
            let second = default_items(mode, Language::En, Currency::Syp, RATE);
            assert_eq!(first.len(), SEEDED_ITEMS_PER_PRESET);
            assert_ne!(first[0].id, second[0].id);
            assert_eq!(first[0].name, second[0].name);
        }
    }

    #[test]
    fn test_default_items_reference_default_categories() {
        let categories = default_categories(Language::Ar);
        for mode in BudgetMode::ALL {
            for item in default_items(mode, Language::Ar, Currency::Syp, RATE) {
                assert!(categories.iter().any(|c| c.id == item.category_id));
                assert_eq!(item.currency, Currency::Syp);
            }
        }
    }

    #[test]
    fn test_book_lookups() {
        let mut book = FurnishingBook::with_default_categories(Language::En);
        let bedroom = book.find_category("bedroom").unwrap().id;
        assert_eq!(bedroom, default_category_id(2));
        assert_eq!(bedroom.short(), "fcat-fc000002");
        assert_eq!(book.find_category("fcat-fc000002").unwrap().name, "Bedroom");
        assert!(book.find_category("Garage").is_none());

        let item = FurnishingItem::new(bedroom, "Bed", Amount::syp(1_000.0));
        let short = item.id.short();
        book.items.push(item);

        assert_eq!(book.find_item(&short).unwrap().name, "Bed");
        assert_eq!(book.items_in(bedroom).count(), 1);
        assert_eq!(book.items_in(default_category_id(1)).count(), 0);
    }

    #[test]
    fn test_seeded_installment_gets_monthly_amount() {
        let items = default_items(BudgetMode::Medium, Language::En, Currency::Syp, RATE);
        let fridge = items.iter().find(|i| i.name == "Refrigerator").unwrap();
        assert!(fridge.is_installment);
        assert_eq!(fridge.monthly_installment, 416_667.0);
    }
}
