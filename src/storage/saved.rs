//! Saved-calculations listing
//!
//! A single JSON array of summary rows in saved.json. The array is always
//! read and written as a whole.

use std::path::PathBuf;

use crate::error::BudgetError;
use crate::models::{CalculationId, SavedCalculation};

use super::calculations::ambiguous_name;
use super::file_io::{read_json, write_json_atomic};

/// Snapshot store for the saved-calculations listing
pub struct SavedCalculationStore {
    path: PathBuf,
}

impl SavedCalculationStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read every row, newest first
    pub fn list(&self) -> Result<Vec<SavedCalculation>, BudgetError> {
        let mut rows: Vec<SavedCalculation> = read_json(&self.path)?;
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }

    /// Find a row by case-insensitive name or by id (short or full)
    pub fn find(&self, query: &str) -> Result<Option<SavedCalculation>, BudgetError> {
        let query = query.trim();
        let name = query.to_lowercase();
        let rows = self.list()?;
        let mut by_name = rows.iter().filter(|r| r.name.to_lowercase() == name);

        match (by_name.next(), by_name.next()) {
            (Some(_), Some(_)) => Err(ambiguous_name(query)),
            (Some(row), None) => Ok(Some(row.clone())),
            (None, _) => Ok(rows.iter().find(|r| r.id.matches(query)).cloned()),
        }
    }

    /// Insert a row or replace the row with the same id
    pub fn upsert(&self, row: SavedCalculation) -> Result<(), BudgetError> {
        let mut rows: Vec<SavedCalculation> = read_json(&self.path)?;
        match rows.iter_mut().find(|r| r.id == row.id) {
            Some(existing) => *existing = row,
            None => rows.push(row),
        }
        write_json_atomic(&self.path, &rows)
    }

    /// Remove a row; returns whether it existed
    pub fn remove(&self, id: CalculationId) -> Result<bool, BudgetError> {
        let mut rows: Vec<SavedCalculation> = read_json(&self.path)?;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Ok(false);
        }
        write_json_atomic(&self.path, &rows)?;
        Ok(true)
    }
}
