//! Currency conversion and formatting
//!
//! The calculator works with exactly two currencies: the Syrian Pound (SYP),
//! which is the base currency for every aggregation, and the US Dollar (USD).
//! The exchange rate is always expressed as SYP per one USD.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BudgetError;

/// One of the two supported currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Syrian Pound, the base currency
    #[default]
    Syp,
    /// US Dollar
    Usd,
}

impl Currency {
    /// Both currencies, in chip order
    pub const ALL: [Currency; 2] = [Currency::Syp, Currency::Usd];

    /// Canonical currency code
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Syp => "SYP",
            Currency::Usd => "USD",
        }
    }

    /// The currency on the other side of the exchange rate
    pub const fn other(self) -> Currency {
        match self {
            Currency::Syp => Currency::Usd,
            Currency::Usd => Currency::Syp,
        }
    }

    /// Currency symbol for a language
    ///
    /// USD is always `$`; SYP is `ل.س` in Arabic and `SYP` in English.
    pub const fn symbol(self, language: Language) -> &'static str {
        match (self, language) {
            (Currency::Usd, _) => "$",
            (Currency::Syp, Language::Ar) => "ل.س",
            (Currency::Syp, Language::En) => "SYP",
        }
    }

    /// Localized currency name
    pub const fn name(self, language: Language) -> &'static str {
        match (self, language) {
            (Currency::Syp, Language::Ar) => "ليرة سورية",
            (Currency::Syp, Language::En) => "Syrian Pound",
            (Currency::Usd, Language::Ar) => "دولار أمريكي",
            (Currency::Usd, Language::En) => "US Dollar",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SYP" | "ل.س" => Ok(Currency::Syp),
            "USD" | "$" => Ok(Currency::Usd),
            other => Err(BudgetError::Validation(format!(
                "Unsupported currency: {} (expected SYP or USD)",
                other
            ))),
        }
    }
}

/// Interface language, which also selects the number/symbol locale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ar,
    En,
}

impl Language {
    /// BCP 47 locale tag, used as the `lang` of HTML reports
    pub const fn locale(self) -> &'static str {
        match self {
            Language::Ar => "ar-SY",
            Language::En => "en-US",
        }
    }

    /// Whether text in this language runs right to left
    pub const fn is_rtl(self) -> bool {
        matches!(self, Language::Ar)
    }

    /// Pick the string matching this language
    pub fn pick<'a>(self, ar: &'a str, en: &'a str) -> &'a str {
        match self {
            Language::Ar => ar,
            Language::En => en,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::Ar => "ar",
            Language::En => "en",
        })
    }
}

impl FromStr for Language {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" | "ar-sy" | "arabic" => Ok(Language::Ar),
            "en" | "en-us" | "english" => Ok(Language::En),
            other => Err(BudgetError::Validation(format!(
                "Unsupported language: {} (expected ar or en)",
                other
            ))),
        }
    }
}

/// Convert an amount between currencies
///
/// `rate` is SYP per USD: USD to SYP multiplies, SYP to USD divides.
pub fn convert(amount: f64, from: Currency, to: Currency, rate: f64) -> f64 {
    match (from, to) {
        (Currency::Usd, Currency::Syp) => amount * rate,
        (Currency::Syp, Currency::Usd) => amount / rate,
        _ => amount,
    }
}

/// Convert an amount between currencies given as raw codes
///
/// Unrecognized codes leave the amount unchanged instead of failing. Callers
/// holding untrusted codes must parse them with `Currency::from_str` first.
pub fn convert_codes(amount: f64, from: &str, to: &str, rate: f64) -> f64 {
    if from == to {
        return amount;
    }

    match (from, to) {
        ("USD", "SYP") => amount * rate,
        ("SYP", "USD") => amount / rate,
        _ => amount,
    }
}

/// Replace NaN and infinities with zero
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Format an amount that is already in `currency`
///
/// The amount is rounded to whole units and grouped with commas. USD puts
/// the symbol first (`$1,234`), SYP puts it last (`1,234 ل.س`).
pub fn format_currency(amount: f64, currency: Currency, language: Language) -> String {
    let formatted = format_grouped(amount);
    let symbol = currency.symbol(language);

    match currency {
        Currency::Usd => format!("{}{}", symbol, formatted),
        Currency::Syp => format!("{} {}", formatted, symbol),
    }
}

/// Format an SYP amount in `currency`, converting it first
pub fn format_from_syp(amount_syp: f64, currency: Currency, rate: f64, language: Language) -> String {
    format_currency(convert(amount_syp, Currency::Syp, currency, rate), currency, language)
}

/// Round to zero decimals and insert thousands separators
pub fn format_grouped(value: f64) -> String {
    let rounded = finite_or_zero(value).round();
    // Avoid rendering "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };

    let digits = format!("{:.0}", rounded.abs());
    let grouped: String = digits
        .chars()
        .rev()
        .collect::<Vec<_>>()
        .chunks(3)
        .map(|c| c.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(",")
        .chars()
        .rev()
        .collect();

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
