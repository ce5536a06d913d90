//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod calc;
pub mod config;
pub mod convert;
pub mod furnishing;
pub mod presets;
pub mod saved;

pub use calc::{handle_calc_command, CalcArgs};
pub use config::{handle_config_command, ConfigCommands};
pub use convert::handle_convert_command;
pub use furnishing::{handle_furnishing_command, FurnishingCommands};
pub use presets::handle_presets_command;
pub use saved::{handle_saved_command, SavedCommands};

use crate::models::{Amount, AmountParseError, Currency};

/// clap value parser for amounts; plain numbers are SYP
pub fn parse_amount(s: &str) -> Result<Amount, AmountParseError> {
    Amount::parse(s, Currency::Syp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("2,500,000").unwrap(), Amount::syp(2_500_000.0));
        assert_eq!(parse_amount("1500 USD").unwrap(), Amount::usd(1_500.0));
        assert_eq!(parse_amount("$20").unwrap(), Amount::usd(20.0));
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("abc").is_err());
    }
}
