//! Mahr and goldsmithing section

use crate::models::{format_currency, Currency, ExchangeContext, Language, MahrInput, MahrView, TermKind};
use crate::services::Calculator;

/// Each mahr part in its active view with its equivalents, plus the
/// goldsmithing total when the advance is not paid
pub fn format_mahr(calculator: &Calculator) -> String {
    let lang = calculator.language();
    let ctx = calculator.exchange();
    let inputs = calculator.inputs();

    let mut output = String::new();
    for (kind, mahr) in [
        (TermKind::MahrAdvance, &inputs.mahr_advance),
        (TermKind::MahrDeferred, &inputs.mahr_deferred),
    ] {
        output.push_str(&format!("{}: {}\n", kind.label(lang), active_value(mahr, ctx, lang)));
        for line in mahr.equivalent_lines(ctx, lang) {
            output.push_str(&format!("    {}\n", line));
        }
    }

    if !calculator.toggles().advance_paid {
        output.push_str(&format!(
            "{}: {}\n",
            TermKind::Goldsmithing.label(lang),
            inputs.goldsmithing.format_total(ctx, lang)
        ));
    }

    output
}

fn active_value(mahr: &MahrInput, ctx: &ExchangeContext, lang: Language) -> String {
    let value = mahr.display_value(ctx);
    match mahr.view {
        MahrView::Gold => mahr.gold.format_grams(lang),
        MahrView::Usd => format_currency(value, Currency::Usd, lang),
        MahrView::Syp => format_currency(value, Currency::Syp, lang),
    }
}
