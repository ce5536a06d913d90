//! Wedding Budget - bilingual wedding cost calculator
//!
//! This library estimates the total cost of a wedding in Syrian Pounds and US
//! Dollars: the gold-denominated mahr, home furnishing (with installment
//! purchases), the wedding itself, the honeymoon, rent paid up front and
//! other expenses. Output is available in Arabic and English.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Currencies, amounts, cost terms, mahr, furnishing, presets
//! - `storage`: JSON file storage layer
//! - `services`: Calculator session, aggregation and persistence
//! - `display`: Terminal formatting of totals and sections
//! - `export`: HTML, CSV, JSON and YAML exports
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use wedding_budget::config::{paths::BudgetPaths, settings::Settings};
//! use wedding_budget::services::Calculator;
//!
//! let paths = BudgetPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let calc = Calculator::with_preset(
//!     settings.exchange_context()?,
//!     settings.language,
//!     settings.budget_mode,
//! );
//! println!("{}", calc.totals().total_display);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod log;
pub mod models;
pub mod services;
pub mod storage;

pub use error::BudgetError;
