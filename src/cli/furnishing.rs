//! Furnishing CLI commands
//!
//! Every command works on a saved calculation: it is opened, edited and
//! saved back under its own name.

use clap::Subcommand;

use crate::display::{format_category_list, format_furnishing};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Amount, FurnishingCategoryId, FurnishingItem};
use crate::services::{CalculationService, Calculator, ItemDraft};
use crate::storage::Storage;

/// Furnishing subcommands
#[derive(Subcommand)]
pub enum FurnishingCommands {
    /// List categories and items of a calculation
    List {
        /// Calculation name or ID
        calculation: String,
    },

    /// List the categories of a calculation
    Categories {
        /// Calculation name or ID
        calculation: String,
    },

    /// Add a category
    #[command(name = "add-category")]
    AddCategory {
        /// Calculation name or ID
        calculation: String,
        /// Category name
        name: String,
    },

    /// Add an item
    #[command(name = "add-item")]
    AddItem {
        /// Calculation name or ID
        calculation: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Item name
        #[arg(short, long)]
        name: String,
        /// Price, e.g. "2500000" or "300 USD"
        #[arg(short, long)]
        price: String,
        /// Buy on installments over this many months
        #[arg(short, long)]
        months: Option<u32>,
    },

    /// Edit an item
    #[command(name = "edit-item")]
    EditItem {
        /// Calculation name or ID
        calculation: String,
        /// Item ID
        item: String,
        /// Move to another category (name or ID)
        #[arg(short, long)]
        category: Option<String>,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New price
        #[arg(short, long)]
        price: Option<String>,
        /// Buy on installments over this many months
        #[arg(short, long, conflicts_with = "cash")]
        months: Option<u32>,
        /// Pay in cash instead of installments
        #[arg(long)]
        cash: bool,
    },

    /// Delete an item
    #[command(name = "delete-item")]
    DeleteItem {
        /// Calculation name or ID
        calculation: String,
        /// Item ID
        item: String,
    },
}

/// Handle a furnishing command
pub fn handle_furnishing_command(storage: &Storage, cmd: FurnishingCommands) -> BudgetResult<()> {
    let service = CalculationService::new(storage);

    match cmd {
        FurnishingCommands::List { calculation } => {
            let calc = service.open(&calculation)?;
            print!("{}", render_section(&calc));
        }

        FurnishingCommands::Categories { calculation } => {
            let calc = service.open(&calculation)?;
            print!("{}", format_category_list(calc.furnishing(), calc.language()));
        }

        FurnishingCommands::AddCategory { calculation, name } => {
            let id = service.edit(&calculation, |calc| calc.add_furnishing_category(&name))?;
            println!("Added category: {}", name.trim());
            println!("  ID: {}", id);
        }

        FurnishingCommands::AddItem {
            calculation,
            category,
            name,
            price,
            months,
        } => {
            let section = service.edit(&calculation, |calc| {
                let category_id = resolve_category(calc, &category)?;
                let price = parse_price(calc, &price)?;
                let mut draft = ItemDraft::new(category_id, name.as_str(), price);
                draft.installment_months = months;
                let id = calc.add_furnishing_item(draft)?;
                println!("Added item: {} ({})", name.trim(), id);
                Ok(render_section(calc))
            })?;
            println!();
            print!("{}", section);
        }

        FurnishingCommands::EditItem {
            calculation,
            item,
            category,
            name,
            price,
            months,
            cash,
        } => {
            let section = service.edit(&calculation, |calc| {
                let current = resolve_item(calc, &item)?;
                let category_id = category
                    .as_deref()
                    .map(|c| resolve_category(calc, c))
                    .transpose()?;
                let price = match price.as_deref() {
                    Some(p) => parse_price(calc, p)?,
                    None => current.price_amount(),
                };
                let installment_months = if cash {
                    None
                } else {
                    months.or(current.is_installment.then_some(current.installment_months))
                };

                let draft = ItemDraft {
                    category_id,
                    name: name.clone().unwrap_or_else(|| current.name.clone()),
                    price,
                    installment_months,
                };
                calc.update_furnishing_item(current.id, draft)?;
                println!("Updated item: {}", current.id);
                Ok(render_section(calc))
            })?;
            println!();
            print!("{}", section);
        }

        FurnishingCommands::DeleteItem { calculation, item } => {
            let deleted = service.edit(&calculation, |calc| {
                let current = resolve_item(calc, &item)?;
                calc.delete_furnishing_item(current.id)?;
                Ok(current)
            })?;
            println!("Deleted item: {} ({})", deleted.name, deleted.id);
        }
    }

    Ok(())
}

fn render_section(calc: &Calculator) -> String {
    format_furnishing(
        calc.furnishing(),
        calc.inputs().home_furnishing.amount,
        calc.exchange().dollar_rate,
        calc.language(),
    )
}

fn resolve_category(calc: &Calculator, query: &str) -> BudgetResult<FurnishingCategoryId> {
    calc.furnishing()
        .book()
        .find_category(query)
        .map(|c| c.id)
        .ok_or_else(|| BudgetError::category_not_found(query))
}

fn resolve_item(calc: &Calculator, query: &str) -> BudgetResult<FurnishingItem> {
    calc.furnishing()
        .book()
        .find_item(query)
        .cloned()
        .ok_or_else(|| BudgetError::item_not_found(query))
}

/// Prices without a currency marker are read in the furnishing main currency
fn parse_price(calc: &Calculator, input: &str) -> BudgetResult<Amount> {
    Amount::parse(input, calc.furnishing().main_currency())
        .map_err(|e| BudgetError::Validation(format!("Invalid price: {}", e)))
}
