//! Calculation repository for JSON storage
//!
//! Manages loading and saving full calculation records to calculations.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BudgetError;
use crate::models::{Calculation, CalculationId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable calculation data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CalculationData {
    calculations: Vec<Calculation>,
}

/// Repository for calculation persistence
pub struct CalculationRepository {
    path: PathBuf,
    data: RwLock<HashMap<CalculationId, Calculation>>,
}

impl CalculationRepository {
    /// Create a new calculation repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load calculations from disk
    pub fn load(&self) -> Result<(), BudgetError> {
        let file_data: CalculationData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for calculation in file_data.calculations {
            data.insert(calculation.id, calculation);
        }

        Ok(())
    }

    /// Save calculations to disk, oldest first
    pub fn save(&self) -> Result<(), BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut calculations: Vec<_> = data.values().cloned().collect();
        calculations.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        write_json_atomic(&self.path, &CalculationData { calculations })
    }

    /// Get a calculation by ID
    pub fn get(&self, id: CalculationId) -> Result<Option<Calculation>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all calculations, most recently updated first
    pub fn get_all(&self) -> Result<Vec<Calculation>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut calculations: Vec<_> = data.values().cloned().collect();
        calculations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(calculations)
    }

    /// Find a calculation by case-insensitive name or by id (short or full)
    ///
    /// A name shared by several records is an error rather than a guess.
    pub fn find(&self, query: &str) -> Result<Option<Calculation>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let query = query.trim();
        let name = query.to_lowercase();
        let mut by_name = data.values().filter(|c| c.name.to_lowercase() == name);

        match (by_name.next(), by_name.next()) {
            (Some(_), Some(_)) => Err(ambiguous_name(query)),
            (Some(calculation), None) => Ok(Some(calculation.clone())),
            (None, _) => Ok(data.values().find(|c| c.id.matches(query)).cloned()),
        }
    }

    /// Whether a record other than `except` already uses `name`
    pub fn name_taken(&self, name: &str, except: CalculationId) -> Result<bool, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name = name.trim().to_lowercase();
        Ok(data
            .values()
            .any(|c| c.id != except && c.name.trim().to_lowercase() == name))
    }

    /// Insert or update a calculation
    pub fn upsert(&self, calculation: Calculation) -> Result<(), BudgetError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(calculation.id, calculation);
        Ok(())
    }

    /// Delete a calculation
    pub fn delete(&self, id: CalculationId) -> Result<bool, BudgetError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count calculations
    pub fn count(&self) -> Result<usize, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}

pub(crate) fn ambiguous_name(name: &str) -> BudgetError {
    BudgetError::Validation(format!(
        "More than one calculation is named '{}'; use its ID instead",
        name
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetInputs, ExchangeContext};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, CalculationRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = CalculationRepository::new(temp_dir.path().join("calculations.json"));
        (temp_dir, repo)
    }

    fn calculation(name: &str) -> Calculation {
        Calculation::new(name, ExchangeContext::default(), BudgetInputs::default())
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let calc = calculation("Summer wedding");
        let id = calc.id;

        repo.upsert(calc.clone()).unwrap();
        repo.save().unwrap();

        let repo2 = CalculationRepository::new(temp_dir.path().join("calculations.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get(id).unwrap(), Some(calc));
    }

    #[test]
    fn test_find_by_name_and_id() {
        let (_temp_dir, repo) = create_test_repo();
        let calc = calculation("Plan A");
        let short = calc.id.short();
        repo.upsert(calc.clone()).unwrap();

        assert_eq!(repo.find("plan a").unwrap().unwrap().id, calc.id);
        assert_eq!(repo.find(&short).unwrap().unwrap().id, calc.id);
        assert!(repo.find("Plan B").unwrap().is_none());
    }

    #[test]
    fn test_shared_name_is_ambiguous() {
        let (_temp_dir, repo) = create_test_repo();
        let first = calculation("Plan A");
        let second = calculation("plan a");
        repo.upsert(first.clone()).unwrap();
        repo.upsert(second.clone()).unwrap();

        assert!(repo.find("Plan A").unwrap_err().is_validation());
        assert_eq!(repo.find(&second.id.short()).unwrap().unwrap().id, second.id);
    }

    #[test]
    fn test_name_taken_ignores_own_record() {
        let (_temp_dir, repo) = create_test_repo();
        let calc = calculation("Plan A");
        repo.upsert(calc.clone()).unwrap();

        assert!(!repo.name_taken(" plan a ", calc.id).unwrap());
        assert!(repo.name_taken("PLAN A", CalculationId::new()).unwrap());
        assert!(!repo.name_taken("Plan B", CalculationId::new()).unwrap());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let calc = calculation("Plan A");
        let id = calc.id;
        repo.upsert(calc).unwrap();

        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
        assert!(repo.get(id).unwrap().is_none());
    }
}
