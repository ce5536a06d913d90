//! Convert CLI command

use crate::config::settings::Settings;
use crate::error::BudgetResult;
use crate::models::{convert, format_currency, Amount, Currency, ExchangeContext, Language};

/// Handle the convert command
///
/// Converts to the other currency unless `to` is given; the rate defaults to
/// the configured dollar rate.
pub fn handle_convert_command(
    settings: &Settings,
    amount: Amount,
    to: Option<Currency>,
    rate: Option<f64>,
    language: Option<Language>,
) -> BudgetResult<()> {
    let language = language.unwrap_or(settings.language);
    let rate = match rate {
        Some(rate) => ExchangeContext::new(settings.gold_price, rate, Currency::Syp)?.dollar_rate,
        None => settings.dollar_rate,
    };

    println!("{}", format_conversion(amount, to, rate, language));
    Ok(())
}

/// `<amount> = <converted>` in the output language
pub fn format_conversion(amount: Amount, to: Option<Currency>, rate: f64, language: Language) -> String {
    let target = to.unwrap_or_else(|| amount.currency.other());
    let converted = convert(amount.value, amount.currency, target, rate);
    format!(
        "{} = {}",
        format_currency(amount.value, amount.currency, language),
        format_currency(converted, target, language)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_other_currency() {
        assert_eq!(
            format_conversion(Amount::usd(100.0), None, 15_000.0, Language::En),
            "$100 = 1,500,000 SYP"
        );
        assert_eq!(
            format_conversion(Amount::syp(30_000.0), None, 15_000.0, Language::En),
            "30,000 SYP = $2"
        );
    }

    #[test]
    fn test_same_currency_is_unchanged() {
        assert_eq!(
            format_conversion(Amount::syp(5_000.0), Some(Currency::Syp), 15_000.0, Language::Ar),
            "5,000 ل.س = 5,000 ل.س"
        );
    }
}
