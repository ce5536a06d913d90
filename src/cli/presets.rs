//! Presets CLI command
//!
//! Lists the three budget modes with their default values and the total each
//! one produces under the current rates.

use crate::config::settings::Settings;
use crate::display::report::{double_separator, left_align, right_align, separator};
use crate::error::BudgetResult;
use crate::models::currency::format_grouped;
use crate::models::{format_currency, format_from_syp, BudgetMode, Currency, Language, TermKind};
use crate::services::Calculator;

const LABEL_WIDTH: usize = 28;
const VALUE_WIDTH: usize = 20;

/// Handle the presets command
pub fn handle_presets_command(settings: &Settings, language: Option<Language>) -> BudgetResult<()> {
    let language = language.unwrap_or(settings.language);
    print!("{}", format_presets(&preset_calculators(settings, language)?, language));
    Ok(())
}

/// One fresh calculator per budget mode
fn preset_calculators(settings: &Settings, language: Language) -> BudgetResult<Vec<(BudgetMode, Calculator)>> {
    let ctx = settings.exchange_context()?;
    Ok(BudgetMode::ALL
        .iter()
        .map(|&mode| (mode, Calculator::with_preset(ctx, language, mode)))
        .collect())
}

/// Render each preset as a block of values and its total
pub fn format_presets(calculators: &[(BudgetMode, Calculator)], language: Language) -> String {
    let width = LABEL_WIDTH + VALUE_WIDTH;
    let mut output = String::new();

    for (mode, calc) in calculators {
        let preset = mode.preset();
        let ctx = calc.exchange();
        let totals = calc.totals();

        output.push_str(&format!("{} ({})\n", mode.label(language), mode));
        output.push_str(&separator(width));
        output.push('\n');

        let grams = language.pick("غرام", "grams");
        let mut rows = vec![
            (
                TermKind::MahrAdvance.label(language).to_string(),
                format!("{} {}", format_grouped(preset.gold_advance), grams),
            ),
            (
                TermKind::MahrDeferred.label(language).to_string(),
                format!("{} {}", format_grouped(preset.gold_deferred), grams),
            ),
        ];
        for (kind, value) in [
            (TermKind::HomeFurnishing, preset.home_furnishing),
            (TermKind::WeddingCost, preset.wedding_cost),
            (TermKind::Honeymoon, preset.honeymoon),
            (TermKind::AdditionalExpenses, preset.additional_expenses),
        ] {
            rows.push((
                kind.label(language).to_string(),
                format_currency(value, Currency::Syp, language),
            ));
        }
        rows.push((
            format!(
                "{} x {}",
                TermKind::Rent.label(language),
                preset.rent_months
            ),
            format_currency(preset.rent_monthly, Currency::Syp, language),
        ));

        for (label, value) in rows {
            output.push_str(&format!(
                "{}{}\n",
                left_align(&label, LABEL_WIDTH),
                right_align(&value, VALUE_WIDTH)
            ));
        }

        output.push_str(&double_separator(width));
        output.push('\n');
        output.push_str(&format!(
            "{}{}\n",
            left_align(language.pick("الإجمالي", "Total"), LABEL_WIDTH),
            right_align(
                &format_currency(totals.total_display, totals.target_currency, language),
                VALUE_WIDTH
            )
        ));
        output.push_str(&format!(
            "{}{}\n",
            left_align("", LABEL_WIDTH),
            right_align(
                &format_from_syp(
                    totals.total_syp,
                    totals.target_currency.other(),
                    ctx.dollar_rate,
                    language
                ),
                VALUE_WIDTH
            )
        ));
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mode_is_listed() {
        let settings = Settings::default();
        let calcs = preset_calculators(&settings, Language::En).unwrap();
        let out = format_presets(&calcs, Language::En);

        assert!(out.contains("Economic (economic)"));
        assert!(out.contains("Medium (medium)"));
        assert!(out.contains("Luxury (luxury)"));
        assert!(out.contains("25,500,000 SYP"));
        assert!(out.contains("150 grams"));
    }

    #[test]
    fn test_totals_grow_with_mode() {
        let settings = Settings::default();
        let calcs = preset_calculators(&settings, Language::En).unwrap();
        let totals: Vec<f64> = calcs.iter().map(|(_, c)| c.totals().total_syp).collect();
        assert!(totals[0] < totals[1] && totals[1] < totals[2]);
    }
}
