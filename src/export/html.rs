//! HTML print report
//!
//! A self-contained page mirroring the on-screen result, computed in its own
//! export currency. The session and its display currency are not changed.

use chrono::Utc;
use std::fmt::Write as _;
use std::io::Write;

use crate::display::{breakdown_notes, breakdown_rows, rate_line};
use crate::display::report::format_percentage;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{format_currency, Currency, Language};
use crate::services::Calculator;

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:760px;margin:2rem auto;color:#111}\
h1{font-size:1.5rem}h2{font-size:1.15rem;margin-top:2rem}\
table{width:100%;border-collapse:collapse}td,th{padding:.4rem;border-bottom:1px solid #ddd}\
td.num{text-align:end;white-space:nowrap}.total{font-size:2rem;font-weight:bold;text-align:center}\
.muted{color:#666;font-size:.9rem}@media print{body{margin:0}}";

/// Render the report for `currency`
pub fn render_html(calculator: &Calculator, currency: Currency) -> String {
    let lang = calculator.language();
    let totals = calculator.totals_in(currency);
    let exchange = calculator.exchange();
    let money = |amount: f64| escape(&format_currency(amount, currency, lang));

    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"{}\" dir=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n",
        lang.locale(),
        if lang.is_rtl() { "rtl" } else { "ltr" },
        escape(lang.pick("آلة حاسبة تكاليف الزواج في سوريا", "Syrian Wedding Cost Calculator")),
        STYLE
    );

    let _ = writeln!(
        html,
        "<h1>{}</h1>",
        escape(lang.pick("آلة حاسبة تكاليف الزواج في سوريا", "Syrian Wedding Cost Calculator"))
    );
    if let Some(name) = calculator.name() {
        let _ = writeln!(html, "<p><strong>{}</strong></p>", escape(name));
    }
    let _ = writeln!(
        html,
        "<p class=\"muted\">{}</p>",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    );

    // Settings
    let _ = writeln!(html, "<h2>{}</h2>\n<table>", escape(lang.pick("الإعدادات العامة", "General Settings")));
    let settings_rows = [
        (
            lang.pick("سعر غرام الذهب", "Gold price per gram"),
            format_currency(exchange.gold_price_per_gram, Currency::Syp, lang),
        ),
        (
            lang.pick("سعر صرف الدولار", "Dollar rate"),
            format_currency(exchange.dollar_rate, Currency::Syp, lang),
        ),
        (
            lang.pick("وضع الميزانية", "Budget mode"),
            calculator.inputs().budget_mode.label(lang).to_string(),
        ),
        (
            lang.pick("المتقدم مقبوض؟", "Advance paid?"),
            yes_no(calculator.toggles().advance_paid, lang).to_string(),
        ),
        (
            lang.pick("استئجار منزل", "Renting a home"),
            yes_no(calculator.toggles().rent_enabled, lang).to_string(),
        ),
    ];
    for (label, value) in settings_rows {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td class=\"num\">{}</td></tr>",
            escape(label),
            escape(&value)
        );
    }
    html.push_str("</table>\n");

    // Summary
    let other = currency.other();
    let _ = writeln!(html, "<h2>{}</h2>", escape(lang.pick("ملخص التكاليف", "Cost Summary")));
    let _ = writeln!(html, "<p class=\"total\">{}</p>", money(totals.total_display));
    let _ = writeln!(
        html,
        "<p class=\"muted\" style=\"text-align:center\">= {}<br>{}</p>",
        escape(&format_currency(totals.to_display_in(totals.total_syp, other), other, lang)),
        escape(&rate_line(totals.dollar_rate))
    );

    // Breakdown
    let rows = breakdown_rows(&totals, lang);
    let _ = writeln!(html, "<h2>{}</h2>\n<table>", escape(lang.pick("تفاصيل التكاليف", "Cost Details")));
    for row in &rows {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>",
            escape(&row.label),
            money(row.value),
            format_percentage(row.percentage)
        );
    }
    let _ = writeln!(
        html,
        "<tr><th>{}</th><th class=\"num\">{}</th><th></th></tr>\n</table>",
        escape(lang.pick("الإجمالي", "Total")),
        money(totals.listed_total())
    );
    for note in breakdown_notes(&totals, lang) {
        let _ = writeln!(html, "<p class=\"muted\">{}</p>", escape(&note));
    }

    // Furnishing
    let furnishing = calculator.furnishing();
    if furnishing.has_items() {
        let rate = exchange.dollar_rate;
        let _ = writeln!(
            html,
            "<h2>{}</h2>\n<table>",
            escape(lang.pick("تفاصيل تجهيز المنزل", "Home Furnishing Details"))
        );
        for total in furnishing.category_totals(rate) {
            if total.item_count == 0 {
                continue;
            }
            let _ = writeln!(
                html,
                "<tr><th>{}</th><th class=\"num\">{}</th></tr>",
                escape(&total.category.name),
                money(totals.to_display(total.immediate_syp))
            );
            for item in furnishing.book().items_in(total.category.id) {
                let method = if item.is_installment {
                    format!(
                        "{} ({} x {})",
                        lang.pick("تقسيط", "Installment"),
                        format_currency(item.monthly_installment, furnishing.main_currency(), lang),
                        item.installment_months
                    )
                } else {
                    lang.pick("كاش", "Cash").to_string()
                };
                let _ = writeln!(
                    html,
                    "<tr><td>{} <span class=\"muted\">{}</span></td><td class=\"num\">{}</td></tr>",
                    escape(&item.name),
                    escape(&method),
                    escape(&format_currency(item.price, item.currency, lang))
                );
            }
        }
        html.push_str("</table>\n");

        if totals.installment_remaining_syp > 0.0 {
            let _ = writeln!(
                html,
                "<p class=\"muted\">{}: {}</p>",
                escape(lang.pick("إجمالي الأقساط المتبقية", "Total Remaining Installments")),
                money(totals.to_display(totals.installment_remaining_syp))
            );
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Write the report for `currency`
pub fn export_html<W: Write>(
    calculator: &Calculator,
    currency: Currency,
    writer: &mut W,
) -> BudgetResult<()> {
    writer
        .write_all(render_html(calculator, currency).as_bytes())
        .map_err(|e| BudgetError::Export(e.to_string()))
}

fn yes_no(value: bool, lang: Language) -> &'static str {
    match (value, lang) {
        (true, Language::Ar) => "نعم",
        (false, Language::Ar) => "لا",
        (true, Language::En) => "Yes",
        (false, Language::En) => "No",
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExchangeContext;

    #[test]
    fn test_arabic_report_is_rtl() {
        let calc = Calculator::new(ExchangeContext::default(), Language::Ar);
        let html = render_html(&calc, Currency::Syp);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<html lang=\"ar-SY\" dir=\"rtl\">"));
        assert!(html.contains("ملخص التكاليف"));
        assert!(html.contains("(1 USD = 15,000 SYP)"));
    }

    #[test]
    fn test_export_currency_is_independent() {
        let calc = Calculator::new(ExchangeContext::default(), Language::En);
        let html = render_html(&calc, Currency::Usd);
        let usd_total = format_currency(calc.totals_in(Currency::Usd).total_display, Currency::Usd, Language::En);

        assert!(html.contains(&format!("<p class=\"total\">{}</p>", usd_total)));
        assert_eq!(calc.exchange().display_currency, Currency::Syp);
        assert!(html.contains("Home Furnishing Details"));
    }

    #[test]
    fn test_names_are_escaped() {
        assert_eq!(escape("<b>A & B</b>"), "&lt;b&gt;A &amp; B&lt;/b&gt;");
    }
}
