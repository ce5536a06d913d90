//! User settings for wedding-budget
//!
//! Default gold price, dollar rate, display currency, language and budget
//! mode applied to every new calculation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::paths::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};
use crate::models::exchange::{DEFAULT_DOLLAR_RATE, DEFAULT_GOLD_PRICE};
use crate::models::{BudgetMode, Currency, ExchangeContext, Language};

/// User settings for wedding-budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Price of one gram of gold in SYP
    #[serde(default = "default_gold_price")]
    pub gold_price: f64,

    /// SYP per one USD
    #[serde(default = "default_dollar_rate")]
    pub dollar_rate: f64,

    /// Currency totals are shown in
    #[serde(default)]
    pub display_currency: Currency,

    /// Interface language
    #[serde(default)]
    pub language: Language,

    /// Preset new calculations start from
    #[serde(default)]
    pub budget_mode: BudgetMode,
}

fn default_schema_version() -> u32 {
    1
}

fn default_gold_price() -> f64 {
    DEFAULT_GOLD_PRICE
}

fn default_dollar_rate() -> f64 {
    DEFAULT_DOLLAR_RATE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            gold_price: default_gold_price(),
            dollar_rate: default_dollar_rate(),
            display_currency: Currency::default(),
            language: Language::default(),
            budget_mode: BudgetMode::default(),
        }
    }
}

/// Keys accepted by `config set`
pub const SETTING_KEYS: [&str; 5] = [
    "gold-price",
    "dollar-rate",
    "currency",
    "language",
    "budget-mode",
];

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> BudgetResult<Self> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BudgetError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Not persisted until the user changes something
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> BudgetResult<()> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// The exchange snapshot new calculations start from
    pub fn exchange_context(&self) -> BudgetResult<ExchangeContext> {
        ExchangeContext::new(self.gold_price, self.dollar_rate, self.display_currency)
            .map_err(|e| BudgetError::Config(format!("Invalid rates in settings: {}", e)))
    }

    /// Set one value by its `config set` key
    pub fn set(&mut self, key: &str, value: &str) -> BudgetResult<()> {
        match key.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "gold-price" => {
                let price = parse_number(value)?;
                ExchangeContext::new(price, self.dollar_rate, self.display_currency)?;
                self.gold_price = price;
            }
            "dollar-rate" => {
                let rate = parse_number(value)?;
                ExchangeContext::new(self.gold_price, rate, self.display_currency)?;
                self.dollar_rate = rate;
            }
            "currency" | "display-currency" => self.display_currency = Currency::from_str(value)?,
            "language" | "lang" => self.language = Language::from_str(value)?,
            "budget-mode" | "mode" | "preset" => self.budget_mode = BudgetMode::from_str(value)?,
            other => {
                return Err(BudgetError::Validation(format!(
                    "Unknown setting: {} (expected one of {})",
                    other,
                    SETTING_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn parse_number(value: &str) -> BudgetResult<f64> {
    value
        .trim()
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| BudgetError::Validation(format!("Not a number: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.gold_price, 1_000_000.0);
        assert_eq!(settings.dollar_rate, 15_000.0);
        assert_eq!(settings.display_currency, Currency::Syp);
        assert_eq!(settings.language, Language::Ar);
        assert_eq!(settings.budget_mode, BudgetMode::Medium);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.set("dollar-rate", "14,500").unwrap();
        settings.set("currency", "usd").unwrap();
        settings.set("language", "en").unwrap();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.dollar_rate, 14_500.0);
        assert_eq!(loaded.exchange_context().unwrap().display_currency, Currency::Usd);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"dollar_rate": 12000}"#).unwrap();
        assert_eq!(settings.dollar_rate, 12_000.0);
        assert_eq!(settings.gold_price, 1_000_000.0);
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(settings.set("dollar-rate", "0").unwrap_err().is_validation());
        assert!(settings.set("dollar-rate", "abc").unwrap_err().is_validation());
        assert!(settings.set("currency", "EUR").unwrap_err().is_validation());
        assert!(settings.set("colour", "red").unwrap_err().is_validation());
        assert_eq!(settings, Settings::default());
    }
}
