//! Amount type: a money value tagged with its currency
//!
//! Amounts keep full `f64` precision. Rounding only happens when a term is
//! explicitly re-denominated or when a value is formatted for display.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::{convert, finite_or_zero, format_grouped, Currency};

/// A monetary value denominated in a specific currency
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Amount {
    pub value: f64,
    pub currency: Currency,
}

impl Amount {
    /// Create an amount
    pub const fn new(value: f64, currency: Currency) -> Self {
        Self { value, currency }
    }

    /// Create an SYP amount
    pub const fn syp(value: f64) -> Self {
        Self::new(value, Currency::Syp)
    }

    /// Create a USD amount
    pub const fn usd(value: f64) -> Self {
        Self::new(value, Currency::Usd)
    }

    /// Create a zero SYP amount
    pub const fn zero() -> Self {
        Self::syp(0.0)
    }

    /// Check if the value is zero
    pub fn is_zero(&self) -> bool {
        self.value == 0.0
    }

    /// The value converted to `currency` without rounding
    pub fn value_in(&self, currency: Currency, rate: f64) -> f64 {
        convert(self.value, self.currency, currency, rate)
    }

    /// The value normalized to SYP, coerced to a finite number
    pub fn to_syp(&self, rate: f64) -> f64 {
        finite_or_zero(self.value_in(Currency::Syp, rate))
    }

    /// Re-denominate this amount in `currency`
    ///
    /// USD to SYP rounds to whole pounds; SYP to USD rounds to cents. The same
    /// currency returns the amount untouched.
    pub fn redenominate(&self, currency: Currency, rate: f64) -> Self {
        let value = match (self.currency, currency) {
            (Currency::Usd, Currency::Syp) => (self.value * rate).round(),
            (Currency::Syp, Currency::Usd) => ((self.value / rate) * 100.0).round() / 100.0,
            _ => self.value,
        };
        Self::new(finite_or_zero(value), currency)
    }

    /// Parse an amount from user input
    ///
    /// Accepts `"2500000"`, `"2,500,000"`, `"1500 USD"`, `"1500:usd"`,
    /// `"1500usd"` and `"$1500"`. Without a currency marker the amount is
    /// read in `default_currency`.
    pub fn parse(s: &str, default_currency: Currency) -> Result<Self, AmountParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountParseError::Empty);
        }

        let (number, currency) = if let Some(stripped) = s.strip_prefix('$') {
            (stripped, Currency::Usd)
        } else {
            split_currency_suffix(s).unwrap_or((s, default_currency))
        };

        let cleaned: String = number
            .trim()
            .trim_end_matches(':')
            .chars()
            .filter(|c| *c != ',' && *c != '_')
            .collect();

        let value: f64 = cleaned
            .trim()
            .parse()
            .map_err(|_| AmountParseError::InvalidFormat(s.to_string()))?;

        if !value.is_finite() {
            return Err(AmountParseError::InvalidFormat(s.to_string()));
        }
        if value < 0.0 {
            return Err(AmountParseError::Negative(s.to_string()));
        }

        Ok(Self::new(value, currency))
    }
}

/// Split a trailing `SYP`/`USD` code (case-insensitive) off the input
fn split_currency_suffix(s: &str) -> Option<(&str, Currency)> {
    if s.len() < 3 || !s.is_char_boundary(s.len() - 3) {
        return None;
    }
    let (number, code) = s.split_at(s.len() - 3);
    let currency = code.parse::<Currency>().ok()?;
    Some((number, currency))
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", format_grouped(self.value), self.currency)
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    Empty,
    InvalidFormat(String),
    Negative(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::Empty => write!(f, "Amount is empty"),
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
            AmountParseError::Negative(s) => write!(f, "Amount cannot be negative: {}", s),
        }
    }
}

impl std::error::Error for AmountParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: f64 = 15000.0;

    #[test]
    fn test_to_syp() {
        assert_eq!(Amount::usd(10.0).to_syp(RATE), 150_000.0);
        assert_eq!(Amount::syp(2_500_000.0).to_syp(RATE), 2_500_000.0);
        assert_eq!(Amount::usd(f64::NAN).to_syp(RATE), 0.0);
    }

    #[test]
    fn test_redenominate_rounding() {
        let usd = Amount::syp(1_000_000.0).redenominate(Currency::Usd, RATE);
        assert_eq!(usd, Amount::usd(66.67));

        let syp = Amount::usd(66.67).redenominate(Currency::Syp, RATE);
        assert_eq!(syp, Amount::syp(1_000_050.0));

        let same = Amount::usd(12.345).redenominate(Currency::Usd, RATE);
        assert_eq!(same.value, 12.345);
    }

    #[test]
    fn test_redenominate_round_trip_within_one_unit() {
        for &value in &[1.0, 999.0, 25_500_000.0, 4_000_000.0, 123_456_789.0] {
            let back = Amount::syp(value)
                .redenominate(Currency::Usd, RATE)
                .redenominate(Currency::Syp, RATE);
            // two-decimal USD rounding loses at most half a cent worth of SYP
            assert!((back.value - value).abs() <= RATE * 0.005 + 1.0, "{}", value);
        }

        let back = Amount::usd(1234.56)
            .redenominate(Currency::Syp, RATE)
            .redenominate(Currency::Usd, RATE);
        assert!((back.value - 1234.56).abs() <= 0.01);
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(Amount::parse("2500000", Currency::Syp).unwrap(), Amount::syp(2_500_000.0));
        assert_eq!(Amount::parse("2,500,000", Currency::Syp).unwrap(), Amount::syp(2_500_000.0));
        assert_eq!(Amount::parse("1500 USD", Currency::Syp).unwrap(), Amount::usd(1500.0));
        assert_eq!(Amount::parse("1500:usd", Currency::Syp).unwrap(), Amount::usd(1500.0));
        assert_eq!(Amount::parse("1500usd", Currency::Syp).unwrap(), Amount::usd(1500.0));
        assert_eq!(Amount::parse("$99.5", Currency::Syp).unwrap(), Amount::usd(99.5));
        assert_eq!(Amount::parse("10", Currency::Usd).unwrap(), Amount::usd(10.0));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Amount::parse("  ", Currency::Syp), Err(AmountParseError::Empty));
        assert!(matches!(
            Amount::parse("abc", Currency::Syp),
            Err(AmountParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            Amount::parse("-5", Currency::Syp),
            Err(AmountParseError::Negative(_))
        ));
        assert!(matches!(
            Amount::parse("10 EUR", Currency::Syp),
            Err(AmountParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::syp(1_000_000.0).to_string(), "1,000,000 SYP");
        assert_eq!(Amount::usd(12.0).to_string(), "12 USD");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Amount::usd(10.5)).unwrap();
        assert_eq!(json, r#"{"value":10.5,"currency":"USD"}"#);
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Amount::usd(10.5));
    }
}
