//! Calculation service
//!
//! Persists calculator sessions: the full record, its furnishing rows and the
//! summary row of the saved-calculations listing.

use tracing::info;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Calculation, FurnishingBook, SavedCalculation};
use crate::storage::Storage;

use super::calculator::Calculator;

/// Service for saving and reopening calculations
pub struct CalculationService<'a> {
    storage: &'a Storage,
}

impl<'a> CalculationService<'a> {
    /// Create a new calculation service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Save a session under `name`
    ///
    /// A session that was opened from storage keeps its id, so saving again
    /// updates the existing record. A name used by another record is rejected.
    pub fn save(&self, calculator: &mut Calculator, name: &str) -> BudgetResult<Calculation> {
        let mut calculation = calculator.to_calculation(name);
        calculation
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        if self
            .storage
            .calculations
            .name_taken(&calculation.name, calculation.id)?
        {
            return Err(BudgetError::Duplicate {
                entity_type: "Calculation",
                identifier: calculation.name,
            });
        }

        if let Some(existing) = self.storage.calculations.get(calculation.id)? {
            calculation.created_at = existing.created_at;
        }
        calculation.touch();

        self.storage.calculations.upsert(calculation.clone())?;
        self.storage
            .furnishing
            .replace_book(calculation.id, calculator.furnishing().book().clone())?;
        self.storage.save_all()?;
        self.storage.saved.upsert(calculation.summary())?;

        calculator.mark_saved(&calculation);
        info!(id = %calculation.id, name = %calculation.name, "Saved calculation");
        Ok(calculation)
    }

    /// Find a stored calculation by id or name
    pub fn find(&self, query: &str) -> BudgetResult<Option<Calculation>> {
        self.storage.calculations.find(query)
    }

    /// Reopen a stored calculation as a calculator session
    pub fn open(&self, query: &str) -> BudgetResult<Calculator> {
        let calculation = self
            .find(query)?
            .ok_or_else(|| BudgetError::calculation_not_found(query))?;

        let book = self
            .storage
            .furnishing
            .get_book(calculation.id)?
            .unwrap_or_else(|| FurnishingBook::with_default_categories(calculation.language));

        Ok(Calculator::from_calculation(calculation, book))
    }

    /// Open, edit and save back a stored calculation under its own name
    pub fn edit<T, F>(&self, query: &str, f: F) -> BudgetResult<T>
    where
        F: FnOnce(&mut Calculator) -> BudgetResult<T>,
    {
        let mut calculator = self.open(query)?;
        let name = calculator.name().unwrap_or(query).to_string();
        let result = f(&mut calculator)?;
        self.save(&mut calculator, &name)?;
        Ok(result)
    }

    /// The saved-calculations listing
    pub fn list(&self) -> BudgetResult<Vec<SavedCalculation>> {
        self.storage.saved.list()
    }

    /// Delete a calculation with its furnishing rows and listing row
    pub fn delete(&self, query: &str) -> BudgetResult<SavedCalculation> {
        let summary = match self.find(query)? {
            Some(calculation) => calculation.summary(),
            None => self
                .storage
                .saved
                .find(query)?
                .ok_or_else(|| BudgetError::calculation_not_found(query))?,
        };

        self.storage.calculations.delete(summary.id)?;
        self.storage.furnishing.delete_for(summary.id)?;
        self.storage.save_all()?;
        self.storage.saved.remove(summary.id)?;

        info!(id = %summary.id, name = %summary.name, "Deleted calculation");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPaths;
    use crate::models::furnishing::default_category_id;
    use crate::models::{Amount, ExchangeContext, Language, TermKind};
    use crate::services::furnishing::ItemDraft;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn calculator() -> Calculator {
        Calculator::new(ExchangeContext::default(), Language::En)
    }

    #[test]
    fn test_save_and_open() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CalculationService::new(&storage);

        let mut calc = calculator();
        calc.set_term_value(TermKind::WeddingCost, 30_000_000.0).unwrap();
        let saved = service.save(&mut calc, "Plan A").unwrap();

        let reopened = service.open("Plan A").unwrap();
        assert_eq!(reopened.id(), Some(saved.id));
        assert_eq!(reopened.totals(), calc.totals());
        assert_eq!(reopened.furnishing().items(), calc.furnishing().items());

        let rows = service.list().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_cost, calc.totals().total_syp);
    }

    #[test]
    fn test_saving_twice_updates_in_place() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CalculationService::new(&storage);

        let mut calc = calculator();
        let first = service.save(&mut calc, "Plan A").unwrap();
        let second = service.save(&mut calc, "Plan A v2").unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);
        assert_eq!(storage.calculations.count().unwrap(), 1);
        assert_eq!(service.list().unwrap()[0].name, "Plan A v2");
    }

    #[test]
    fn test_name_of_another_calculation_is_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CalculationService::new(&storage);

        let mut first = calculator();
        first.set_term_value(TermKind::WeddingCost, 1.0).unwrap();
        let saved = service.save(&mut first, "dup").unwrap();

        let mut second = calculator();
        second.set_term_value(TermKind::WeddingCost, 999_999_999.0).unwrap();
        let err = service.save(&mut second, " DUP ").unwrap_err();
        assert!(matches!(err, BudgetError::Duplicate { .. }));
        assert_eq!(second.id(), None);

        assert_eq!(storage.calculations.count().unwrap(), 1);
        assert_eq!(service.list().unwrap().len(), 1);
        let reopened = service.open("dup").unwrap();
        assert_eq!(reopened.id(), Some(saved.id));
        assert_eq!(reopened.inputs().wedding_cost.value(), 1.0);
    }

    #[test]
    fn test_save_rejects_empty_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CalculationService::new(&storage);
        let mut calc = calculator();
        assert!(service.save(&mut calc, " ").unwrap_err().is_validation());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_edit_persists_furnishing_changes() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CalculationService::new(&storage);
        let mut calc = calculator();
        service.save(&mut calc, "Plan A").unwrap();

        service
            .edit("Plan A", |c| {
                c.add_furnishing_item(ItemDraft::new(
                    default_category_id(1),
                    "Oven",
                    Amount::usd(200.0),
                ))
            })
            .unwrap();

        let reopened = service.open("Plan A").unwrap();
        assert_eq!(reopened.furnishing().items().len(), 4);
        assert_eq!(reopened.furnishing().items()[0].name, "Oven");
    }

    #[test]
    fn test_delete_removes_everything() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CalculationService::new(&storage);
        let mut calc = calculator();
        let saved = service.save(&mut calc, "Plan A").unwrap();

        let removed = service.delete(&saved.id.short()).unwrap();
        assert_eq!(removed.id, saved.id);
        assert!(service.list().unwrap().is_empty());
        assert!(storage.furnishing.get_book(saved.id).unwrap().is_none());
        assert!(service.open("Plan A").unwrap_err().is_not_found());
        assert!(service.delete("Plan A").unwrap_err().is_not_found());
    }
}
