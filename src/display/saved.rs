//! Saved-calculations listing

use tabled::{settings::Style, Table, Tabled};

use crate::models::currency::format_grouped;
use crate::models::{format_from_syp, Language, SavedCalculation};

use super::report::truncate;

#[derive(Tabled)]
struct SavedRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

/// Table of saved calculations; totals shown in each row's own currency
pub fn format_saved_list(rows: &[SavedCalculation], language: Language) -> String {
    if rows.is_empty() {
        return format!(
            "{}\n",
            language.pick(
                "لا توجد حسابات محفوظة حتى الآن.",
                "No saved calculations yet."
            )
        );
    }

    let rows: Vec<SavedRow> = rows
        .iter()
        .map(|r| SavedRow {
            id: r.id.to_string(),
            name: truncate(&r.name, 30),
            date: r.date.format("%Y-%m-%d %H:%M").to_string(),
            total: format_from_syp(r.total_cost, r.currency, r.dollar_rate, language),
            rate: format_grouped(r.dollar_rate),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}
