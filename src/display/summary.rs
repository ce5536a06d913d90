//! Cost summary card

use crate::models::currency::format_grouped;
use crate::models::{format_currency, Language};
use crate::services::Totals;

use super::report::{double_separator, format_header, separator};

const CARD_WIDTH: usize = 44;

/// Total in the target currency, its equivalent in the other one, the rate
/// line and any remaining furnishing installments
pub fn format_summary(totals: &Totals, language: Language) -> String {
    let currency = totals.target_currency;
    let other = currency.other();

    let total = format_currency(totals.total_display, currency, language);
    let equivalent = format_currency(
        totals.to_display_in(totals.total_syp, other),
        other,
        language,
    );

    let mut output = String::new();
    output.push_str(&double_separator(CARD_WIDTH));
    output.push('\n');
    output.push_str(&format_header(
        language.pick("ملخص التكاليف", "Cost Summary"),
        CARD_WIDTH,
    ));
    output.push('\n');
    output.push_str(&separator(CARD_WIDTH));
    output.push('\n');
    output.push_str(&format_header(&total, CARD_WIDTH));
    output.push('\n');
    output.push_str(&format_header(&format!("= {}", equivalent), CARD_WIDTH));
    output.push('\n');
    output.push_str(&format_header(&rate_line(totals.dollar_rate), CARD_WIDTH));
    output.push('\n');

    if totals.installment_remaining_syp > 0.0 {
        output.push_str(&separator(CARD_WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{}: {}\n",
            language.pick("إجمالي الأقساط المتبقية", "Total Remaining Installments"),
            format_currency(
                totals.to_display(totals.installment_remaining_syp),
                currency,
                language
            ),
        ));
    }

    output.push_str(&double_separator(CARD_WIDTH));
    output.push('\n');
    output
}

/// `(1 USD = 15,000 SYP)`
pub fn rate_line(dollar_rate: f64) -> String {
    format!("(1 USD = {} SYP)", format_grouped(dollar_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, ExchangeContext, TermKind};
    use crate::services::Calculator;

    fn calculator(currency: Currency, language: Language) -> Calculator {
        let ctx = ExchangeContext::default().with_display_currency(currency);
        let mut calc = Calculator::new(ctx, language);
        for item in calc.furnishing().items().to_vec() {
            calc.delete_furnishing_item(item.id).unwrap();
        }
        calc
    }

    #[test]
    fn test_summary_in_syp() {
        let calc = calculator(Currency::Syp, Language::En);
        let totals = calc.totals();
        let out = format_summary(&totals, Language::En);

        assert!(out.contains("Cost Summary"));
        assert!(out.contains(&format_currency(totals.total_syp, Currency::Syp, Language::En)));
        assert!(out.contains(&format!(
            "= {}",
            format_currency(totals.total_syp / 15_000.0, Currency::Usd, Language::En)
        )));
        assert!(out.contains("(1 USD = 15,000 SYP)"));
        assert!(!out.contains("Remaining"));
    }

    #[test]
    fn test_summary_in_usd_shows_syp_equivalent() {
        let mut calc = calculator(Currency::Usd, Language::Ar);
        calc.set_term_value(TermKind::WeddingCost, 0.0).unwrap();
        let totals = calc.totals();
        let out = format_summary(&totals, Language::Ar);

        assert!(out.contains("ملخص التكاليف"));
        assert!(out.contains(&format_currency(totals.total_display, Currency::Usd, Language::Ar)));
        assert!(out.contains(&format!(
            "= {}",
            format_currency(totals.total_syp, Currency::Syp, Language::Ar)
        )));
    }

    #[test]
    fn test_summary_lists_installment_remainder() {
        let calc = Calculator::new(ExchangeContext::default(), Language::En);
        let totals = calc.totals();
        assert!(totals.installment_remaining_syp > 0.0);
        let out = format_summary(&totals, Language::En);
        assert!(out.contains("Total Remaining Installments: "));
    }
}
