//! Path management for wedding-budget
//!
//! Provides platform path resolution for configuration and saved calculations.
//!
//! ## Path Resolution Order
//!
//! 1. `WEDDING_BUDGET_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories::ProjectDirs`
//!    (e.g. `~/.config/wedding-budget` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::BudgetError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "WEDDING_BUDGET_DATA_DIR";

/// Manages all paths used by wedding-budget
#[derive(Debug, Clone)]
pub struct BudgetPaths {
    /// Base directory for all wedding-budget data
    base_dir: PathBuf,
}

impl BudgetPaths {
    /// Create a new BudgetPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be determined.
    pub fn new() -> Result<Self, BudgetError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create BudgetPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the directory where exports land by default (`<base>/exports/`)
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to calculations.json (full calculation records)
    pub fn calculations_file(&self) -> PathBuf {
        self.data_dir().join("calculations.json")
    }

    /// Get the path to furnishing.json (category and item child records)
    pub fn furnishing_file(&self) -> PathBuf {
        self.data_dir().join("furnishing.json")
    }

    /// Get the path to saved.json (the saved-calculations listing)
    pub fn saved_file(&self) -> PathBuf {
        self.data_dir().join("saved.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), BudgetError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BudgetError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BudgetError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, BudgetError> {
    let proj_dirs = ProjectDirs::from("", "", "wedding-budget")
        .ok_or_else(|| BudgetError::Config("Could not determine project directories".into()))?;
    Ok(proj_dirs.config_dir().to_path_buf())
}
