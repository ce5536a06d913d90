//! Storage layer for wedding-budget
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation.

pub mod calculations;
pub mod file_io;
pub mod furnishing;
pub mod saved;

pub use calculations::CalculationRepository;
pub use file_io::{read_json, write_json_atomic};
pub use furnishing::FurnishingRepository;
pub use saved::SavedCalculationStore;

use crate::config::paths::BudgetPaths;
use crate::error::BudgetError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BudgetPaths,
    pub calculations: CalculationRepository,
    pub furnishing: FurnishingRepository,
    pub saved: SavedCalculationStore,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: BudgetPaths) -> Result<Self, BudgetError> {
        paths.ensure_directories()?;

        Ok(Self {
            calculations: CalculationRepository::new(paths.calculations_file()),
            furnishing: FurnishingRepository::new(paths.furnishing_file()),
            saved: SavedCalculationStore::new(paths.saved_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    /// Load all repositories from disk
    pub fn load_all(&self) -> Result<(), BudgetError> {
        self.calculations.load()?;
        self.furnishing.load()?;
        Ok(())
    }

    /// Save all repositories to disk
    pub fn save_all(&self) -> Result<(), BudgetError> {
        self.calculations.save()?;
        self.furnishing.save()?;
        Ok(())
    }
}
