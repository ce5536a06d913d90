//! Furnishing section formatting
//!
//! Categories with their items, per-category totals in the section's local
//! currency, the section total and the remaining installments.

use crate::models::{format_currency, Amount, Language};
use crate::services::FurnishingManager;

use super::report::{display_width, left_align, right_align, separator, truncate};

const NAME_WIDTH: usize = 24;

/// Format the furnishing section
///
/// `fallback` is the furnishing cost term used when there are no items.
pub fn format_furnishing(
    manager: &FurnishingManager,
    fallback: Amount,
    rate: f64,
    language: Language,
) -> String {
    let local = manager.local_currency();
    let main = manager.main_currency();

    let mut output = String::new();
    output.push_str(language.pick("تفاصيل تجهيز المنزل", "Home Furnishing Details"));
    output.push('\n');
    output.push_str(&separator(60));
    output.push('\n');

    if manager.categories().is_empty() {
        output.push_str(language.pick(
            "لا توجد فئات حتى الآن. أضف فئة للبدء.",
            "No categories yet. Add a category to get started.",
        ));
        output.push('\n');
    }

    for total in manager.category_totals(rate) {
        let value = format_currency(manager.display_value(total.immediate_syp, rate), local, language);
        output.push_str(&format!(
            "{}  {}  {}\n",
            left_align(&total.category.name, NAME_WIDTH + 2),
            right_align(&value, 20),
            total.category.id
        ));

        let items: Vec<_> = manager.book().items_in(total.category.id).collect();
        if items.is_empty() {
            output.push_str(&format!(
                "  {}\n",
                language.pick(
                    "لا توجد عناصر في هذه الفئة حتى الآن.",
                    "No items in this category yet."
                )
            ));
            continue;
        }

        for item in items {
            let price = format_currency(item.price, item.currency, language);
            let method = if item.is_installment {
                format!(
                    "{} {} x {}",
                    language.pick("تقسيط", "Installment"),
                    format_currency(item.monthly_installment, main, language),
                    item.installment_months
                )
            } else {
                language.pick("كاش", "Cash").to_string()
            };
            output.push_str(&format!(
                "  {}  {}  {}  {}\n",
                left_align(&truncate(&item.name, NAME_WIDTH), NAME_WIDTH),
                right_align(&price, 20),
                method,
                item.id
            ));
        }
    }

    output.push_str(&separator(60));
    output.push('\n');

    let section_total = format_currency(manager.display_total(fallback, rate), local, language);
    if manager.has_items() {
        output.push_str(&format!(
            "{}: {}\n",
            language.pick("إجمالي تجهيز المنزل (مخصص)", "Home Furnishing Total (custom)"),
            section_total
        ));
    } else {
        output.push_str(&format!(
            "{}: {}\n",
            language.pick("إجمالي تجهيز المنزل (افتراضي)", "Home Furnishing Total (default)"),
            section_total
        ));
        output.push_str(language.pick(
            "يتم استخدام القيمة الافتراضية حسب وضع الميزانية المختار. أضف عناصر لتخصيص القيمة.",
            "Using the default value for the selected budget mode. Add items to customize it.",
        ));
        output.push('\n');
    }

    let totals = manager.totals(rate);
    if totals.remaining_syp > 0.0 {
        let remaining = format_currency(manager.display_value(totals.remaining_syp, rate), local, language);
        let label = language.pick("إجمالي الأقساط المتبقية", "Total Remaining Installments");
        output.push_str(&format!("{}: {}\n", label, remaining));
        output.push_str(language.pick(
            "ملاحظة: يتم احتساب 50% فقط من قيمة العناصر المقسطة في المجموع الكلي (كدفعة أولى).",
            "Note: Only 50% of installment items' value is included in the total (as down payment).",
        ));
        output.push('\n');
    }

    output
}

/// One line per category: name, id and item count
pub fn format_category_list(manager: &FurnishingManager, language: Language) -> String {
    let width = manager
        .categories()
        .iter()
        .map(|c| display_width(&c.name))
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for category in manager.categories() {
        let count = manager.book().items_in(category.id).count();
        output.push_str(&format!(
            "{}  {}  {} {}\n",
            left_align(&category.name, width),
            category.id,
            count,
            language.pick("عنصر", if count == 1 { "item" } else { "items" })
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::furnishing::default_category_id;
    use crate::models::{BudgetMode, Currency, FurnishingBook};
    use crate::services::ItemDraft;

    const RATE: f64 = 15_000.0;

    #[test]
    fn test_seeded_section() {
        let manager = FurnishingManager::seeded(BudgetMode::Medium, Language::En, Currency::Syp, RATE);
        let out = format_furnishing(&manager, Amount::syp(1.0), RATE, Language::En);

        assert!(out.contains("Home Furnishing Details"));
        assert!(out.contains("Bedroom"));
        assert!(out.contains("Home Furnishing Total (custom)"));
        assert!(out.contains("Installment"));
        assert!(out.contains("Total Remaining Installments"));
    }

    #[test]
    fn test_fallback_without_items() {
        let manager = FurnishingManager::new(
            FurnishingBook::with_default_categories(Language::Ar),
            Currency::Syp,
        );
        let out = format_furnishing(&manager, Amount::syp(40_000_000.0), RATE, Language::Ar);

        assert!(out.contains("إجمالي تجهيز المنزل (افتراضي): 40,000,000 ل.س"));
        assert!(out.contains("لا توجد عناصر في هذه الفئة حتى الآن."));
        assert!(!out.contains("الأقساط المتبقية"));
    }

    #[test]
    fn test_local_currency_usd() {
        let mut manager = FurnishingManager::new(
            FurnishingBook::with_default_categories(Language::En),
            Currency::Syp,
        );
        manager.set_local_currency(Currency::Usd);
        manager
            .add_item(
                ItemDraft::new(default_category_id(1), "Oven", Amount::syp(3_000_000.0)),
                RATE,
            )
            .unwrap();

        let out = format_furnishing(&manager, Amount::syp(0.0), RATE, Language::En);
        assert!(out.contains("Home Furnishing Total (custom): $200"));
        assert!(out.contains("Cash"));
    }

    #[test]
    fn test_category_list() {
        let manager = FurnishingManager::seeded(BudgetMode::Medium, Language::En, Currency::Syp, RATE);
        let out = format_category_list(&manager, Language::En);
        assert_eq!(out.lines().count(), 5);
        assert!(out.contains("fcat-fc000001"));
    }
}
