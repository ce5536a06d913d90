//! Configuration module for wedding-budget
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence (default rates, currency, language)

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::Settings;
