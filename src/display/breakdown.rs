//! Cost breakdown formatting
//!
//! Lists every non-zero line of an aggregation with its share of the listed
//! total, followed by the advance and deferred-mahr notes.

use crate::models::{format_currency, Language, TermKind};
use crate::services::Totals;

use super::report::{
    display_width, format_percentage, format_quantity, left_align, percentage_of, right_align,
    separator,
};

/// One listed line of the breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub kind: TermKind,
    pub label: String,
    pub value: f64,
    pub formatted: String,
    /// Share of the listed total, in percent
    pub percentage: f64,
}

/// Lines with a positive value, in display order, with their percentages
pub fn breakdown_rows(totals: &Totals, language: Language) -> Vec<BreakdownRow> {
    let listed_total = totals.listed_total();
    totals
        .listed_lines()
        .into_iter()
        .map(|line| BreakdownRow {
            kind: line.kind,
            label: line.kind.label(language).to_string(),
            value: line.value_display,
            formatted: format_currency(line.value_display, totals.target_currency, language),
            percentage: percentage_of(line.value_display, listed_total),
        })
        .collect()
}

/// Notes printed under the breakdown
///
/// An advance left out of the total is noted with its value, and the
/// deferred mahr is always noted when non-zero because it is never summed.
pub fn breakdown_notes(totals: &Totals, language: Language) -> Vec<String> {
    let currency = totals.target_currency;
    let mut notes = Vec::new();

    if let Some(advance_syp) = totals.advance_excluded_syp {
        let grams = format_quantity(totals.advance_grams);
        let value = format_currency(totals.to_display(advance_syp), currency, language);
        notes.push(match language {
            Language::Ar => format!(
                "ملاحظة: المقدم ({} غرام ذهب = {}) غير مدرج في الإجمالي حسب الإعدادات.",
                grams, value
            ),
            Language::En => format!(
                "Note: Advance ({} grams of gold = {}) is not included in the total as per settings.",
                grams, value
            ),
        });
    }

    if totals.deferred_grams > 0.0 {
        let grams = format_quantity(totals.deferred_grams);
        let value = format_currency(totals.to_display(totals.deferred_syp), currency, language);
        notes.push(match language {
            Language::Ar => format!("المؤخر: {} غرام ذهب = {}", grams, value),
            Language::En => format!("Deferred: {} grams of gold = {}", grams, value),
        });
    }

    notes
}

/// Format the breakdown as an aligned table with a total row and notes
pub fn format_breakdown(totals: &Totals, language: Language) -> String {
    let rows = breakdown_rows(totals, language);
    let total_label = language.pick("الإجمالي", "Total");
    let total_value = format_currency(totals.listed_total(), totals.target_currency, language);

    let label_width = rows
        .iter()
        .map(|r| display_width(&r.label))
        .chain(std::iter::once(display_width(total_label)))
        .max()
        .unwrap_or(5);
    let value_width = rows
        .iter()
        .map(|r| display_width(&r.formatted))
        .chain(std::iter::once(display_width(&total_value)))
        .max()
        .unwrap_or(5);
    let width = label_width + value_width + 10;

    let mut output = String::new();
    output.push_str(language.pick("تفاصيل التكاليف", "Cost Details"));
    output.push('\n');
    output.push_str(&separator(width));
    output.push('\n');

    for row in &rows {
        output.push_str(&format!(
            "{}  {}  {}\n",
            left_align(&row.label, label_width),
            right_align(&row.formatted, value_width),
            right_align(&format_percentage(row.percentage), 6),
        ));
    }

    output.push_str(&separator(width));
    output.push('\n');
    output.push_str(&format!(
        "{}  {}\n",
        left_align(total_label, label_width),
        right_align(&total_value, value_width),
    ));

    let notes = breakdown_notes(totals, language);
    if !notes.is_empty() {
        output.push('\n');
        for note in notes {
            output.push_str(&note);
            output.push('\n');
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, ExchangeContext};
    use crate::services::{Calculator, MahrPart};

    fn calculator(language: Language) -> Calculator {
        let mut calc = Calculator::new(ExchangeContext::default(), language);
        for item in calc.furnishing().items().to_vec() {
            calc.delete_furnishing_item(item.id).unwrap();
        }
        for kind in [
            TermKind::HomeFurnishing,
            TermKind::WeddingCost,
            TermKind::Honeymoon,
            TermKind::AdditionalExpenses,
            TermKind::Rent,
        ] {
            calc.set_term_value(kind, 0.0).unwrap();
        }
        calc.set_mahr_grams(MahrPart::Deferred, 0.0);
        calc
    }

    #[test]
    fn test_zero_lines_are_filtered_and_percentages_sum() {
        let mut calc = calculator(Language::En);
        calc.set_mahr_grams(MahrPart::Advance, 100.0);
        calc.set_term_value(TermKind::WeddingCost, 50_000_000.0).unwrap();
        calc.set_term_value(TermKind::Honeymoon, 50_000_000.0).unwrap();

        let rows = breakdown_rows(&calc.totals(), Language::En);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].kind, TermKind::MahrAdvance);
        assert_eq!(rows[0].percentage, 50.0);
        assert_eq!(rows[1].formatted, "50,000,000 SYP");
        let sum: f64 = rows.iter().map(|r| r.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_usd_lines_are_whole_dollars() {
        let mut calc = calculator(Language::En);
        calc.set_mahr_grams(MahrPart::Advance, 0.0);
        calc.set_term_value(TermKind::WeddingCost, 100_000.0).unwrap();

        let rows = breakdown_rows(&calc.totals_in(Currency::Usd), Language::En);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, 7.0);
        assert_eq!(rows[0].formatted, "$7");
    }

    #[test]
    fn test_notes_for_excluded_advance_and_deferred() {
        let mut calc = calculator(Language::En);
        calc.set_mahr_grams(MahrPart::Advance, 25.0);
        calc.set_mahr_grams(MahrPart::Deferred, 12.5);
        calc.set_advance_paid(false);

        let notes = breakdown_notes(&calc.totals(), Language::En);
        assert_eq!(
            notes,
            vec![
                "Note: Advance (25 grams of gold = 25,000,000 SYP) is not included in the total as per settings."
                    .to_string(),
                "Deferred: 12.5 grams of gold = 12,500,000 SYP".to_string(),
            ]
        );
    }

    #[test]
    fn test_arabic_table() {
        let mut calc = calculator(Language::Ar);
        calc.set_mahr_grams(MahrPart::Advance, 10.0);

        let out = format_breakdown(&calc.totals(), Language::Ar);
        assert!(out.starts_with("تفاصيل التكاليف"));
        assert!(out.contains("المهر المقدم"));
        assert!(out.contains("10,000,000 ل.س"));
        assert!(out.contains("100.0%"));
        assert!(out.contains("الإجمالي"));
    }
}
