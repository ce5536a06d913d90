//! Furnishing repository for JSON storage
//!
//! Categories and items are stored as flat child rows of their calculation in
//! furnishing.json. In memory they are grouped into one `FurnishingBook` per
//! calculation.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::BudgetError;
use crate::models::{
    CalculationId, FurnishingBook, FurnishingCategory, FurnishingCategoryId, FurnishingItem,
};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CategoryRow {
    calculation_id: CalculationId,
    #[serde(flatten)]
    category: FurnishingCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemRow {
    calculation_id: CalculationId,
    #[serde(flatten)]
    item: FurnishingItem,
}

/// Serializable furnishing data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct FurnishingData {
    #[serde(default)]
    categories: Vec<CategoryRow>,
    #[serde(default)]
    items: Vec<ItemRow>,
}

/// Repository for furnishing categories and items
pub struct FurnishingRepository {
    path: PathBuf,
    data: RwLock<HashMap<CalculationId, FurnishingBook>>,
}

impl FurnishingRepository {
    /// Create a new furnishing repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load rows from disk and group them per calculation
    pub fn load(&self) -> Result<(), BudgetError> {
        let file_data: FurnishingData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for row in file_data.categories {
            data.entry(row.calculation_id)
                .or_default()
                .categories
                .push(row.category);
        }
        for row in file_data.items {
            data.entry(row.calculation_id)
                .or_default()
                .items
                .push(row.item);
        }

        Ok(())
    }

    /// Flatten every book back into rows and write them to disk
    pub fn save(&self) -> Result<(), BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut calculation_ids: Vec<_> = data.keys().copied().collect();
        calculation_ids.sort();

        let mut file_data = FurnishingData::default();
        for calculation_id in calculation_ids {
            let Some(book) = data.get(&calculation_id) else {
                continue;
            };
            file_data
                .categories
                .extend(book.categories.iter().cloned().map(|category| CategoryRow {
                    calculation_id,
                    category,
                }));
            file_data
                .items
                .extend(book.items.iter().cloned().map(|item| ItemRow {
                    calculation_id,
                    item,
                }));
        }

        write_json_atomic(&self.path, &file_data)
    }

    /// Get the categories and items of a calculation
    pub fn get_book(&self, calculation_id: CalculationId) -> Result<Option<FurnishingBook>, BudgetError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&calculation_id).cloned())
    }

    /// Categories of a calculation
    pub fn categories_for(
        &self,
        calculation_id: CalculationId,
    ) -> Result<Vec<FurnishingCategory>, BudgetError> {
        Ok(self
            .get_book(calculation_id)?
            .map(|book| book.categories)
            .unwrap_or_default())
    }

    /// Items of one category of a calculation
    pub fn items_for_category(
        &self,
        calculation_id: CalculationId,
        category_id: FurnishingCategoryId,
    ) -> Result<Vec<FurnishingItem>, BudgetError> {
        Ok(self
            .get_book(calculation_id)?
            .map(|book| book.items_in(category_id).cloned().collect())
            .unwrap_or_default())
    }

    /// Replace every row of a calculation
    pub fn replace_book(
        &self,
        calculation_id: CalculationId,
        book: FurnishingBook,
    ) -> Result<(), BudgetError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(calculation_id, book);
        Ok(())
    }

    /// Delete every row of a calculation
    pub fn delete_for(&self, calculation_id: CalculationId) -> Result<bool, BudgetError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&calculation_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::furnishing::default_category_id;
    use crate::models::{Amount, Language};
    use tempfile::TempDir;

    fn book_with_item() -> FurnishingBook {
        let mut book = FurnishingBook::with_default_categories(Language::En);
        book.items.push(
            FurnishingItem::new(default_category_id(2), "Bed", Amount::syp(9_000_000.0))
                .with_installments(12),
        );
        book
    }

    #[test]
    fn test_rows_round_trip_per_calculation() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("furnishing.json");
        let repo = FurnishingRepository::new(path.clone());

        let a = CalculationId::new();
        let b = CalculationId::new();
        let book = book_with_item();
        repo.replace_book(a, book.clone()).unwrap();
        repo.replace_book(b, FurnishingBook::with_default_categories(Language::Ar))
            .unwrap();
        repo.save().unwrap();

        let repo2 = FurnishingRepository::new(path);
        repo2.load().unwrap();
        assert_eq!(repo2.get_book(a).unwrap(), Some(book));
        assert_eq!(repo2.categories_for(b).unwrap()[0].name, "المطبخ");
        assert!(repo2.get_book(b).unwrap().unwrap().items.is_empty());
    }

    #[test]
    fn test_items_for_category() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FurnishingRepository::new(temp_dir.path().join("furnishing.json"));
        let calc = CalculationId::new();
        repo.replace_book(calc, book_with_item()).unwrap();

        assert_eq!(repo.items_for_category(calc, default_category_id(2)).unwrap().len(), 1);
        assert!(repo.items_for_category(calc, default_category_id(1)).unwrap().is_empty());
        assert!(repo.categories_for(CalculationId::new()).unwrap().is_empty());
    }

    #[test]
    fn test_delete_for() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FurnishingRepository::new(temp_dir.path().join("furnishing.json"));
        let calc = CalculationId::new();
        repo.replace_book(calc, book_with_item()).unwrap();

        assert!(repo.delete_for(calc).unwrap());
        assert!(repo.get_book(calc).unwrap().is_none());
        assert!(!repo.delete_for(calc).unwrap());
    }
}
