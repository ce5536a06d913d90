//! Saved-calculation CLI commands

use clap::Subcommand;

use crate::display::{format_breakdown, format_chart, format_saved_list, format_summary};
use crate::error::BudgetResult;
use crate::models::Language;
use crate::services::CalculationService;
use crate::storage::Storage;

/// Saved-calculation subcommands
#[derive(Subcommand)]
pub enum SavedCommands {
    /// List saved calculations, newest first
    List,

    /// Show a saved calculation
    Show {
        /// Calculation name or ID
        calculation: String,
        /// Also print the proportional chart
        #[arg(long)]
        chart: bool,
    },

    /// Delete a saved calculation
    Delete {
        /// Calculation name or ID
        calculation: String,
    },
}

/// Handle a saved-calculation command
pub fn handle_saved_command(storage: &Storage, language: Language, cmd: SavedCommands) -> BudgetResult<()> {
    let service = CalculationService::new(storage);

    match cmd {
        SavedCommands::List => {
            let rows = service.list()?;
            print!("{}", format_saved_list(&rows, language));
        }

        SavedCommands::Show { calculation, chart } => {
            let calculator = service.open(&calculation)?;
            let language = calculator.language();
            let totals = calculator.totals();

            if let Some(name) = calculator.name() {
                println!("{}", name);
            }
            if let Some(id) = calculator.id() {
                println!("ID: {}", id);
            }
            println!();
            print!("{}", format_summary(&totals, language));
            println!();
            print!("{}", format_breakdown(&totals, language));
            if chart {
                println!();
                print!("{}", format_chart(&totals, language));
            }
        }

        SavedCommands::Delete { calculation } => {
            let deleted = service.delete(&calculation)?;
            println!("Deleted calculation: {} ({})", deleted.name, deleted.id);
        }
    }

    Ok(())
}
