//! CSV Export functionality
//!
//! Exports the cost breakdown as spreadsheet rows.

use std::io::Write;

use crate::display::{breakdown_notes, breakdown_rows};
use crate::error::BudgetResult;
use crate::models::Currency;
use crate::services::Calculator;

/// Export the breakdown in `currency` to CSV
///
/// One row per listed line, a total row, then one row per note with only
/// the label column filled.
pub fn export_breakdown_csv<W: Write>(
    calculator: &Calculator,
    currency: Currency,
    writer: W,
) -> BudgetResult<()> {
    let language = calculator.language();
    let totals = calculator.totals_in(currency);
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(["Key", "Item", "Value", "Currency", "Percentage"])?;

    for row in breakdown_rows(&totals, language) {
        csv.write_record([
            row.kind.key().to_string(),
            row.label,
            format_value(row.value, currency),
            currency.code().to_string(),
            format!("{:.1}", row.percentage),
        ])?;
    }

    csv.write_record([
        "total".to_string(),
        language.pick("الإجمالي", "Total").to_string(),
        format_value(totals.listed_total(), currency),
        currency.code().to_string(),
        "100.0".to_string(),
    ])?;

    for note in breakdown_notes(&totals, language) {
        csv.write_record(["note".to_string(), note, String::new(), String::new(), String::new()])?;
    }

    csv.flush()?;
    Ok(())
}

fn format_value(value: f64, currency: Currency) -> String {
    match currency {
        Currency::Usd => format!("{:.0}", value),
        Currency::Syp => format!("{:.2}", value),
    }
}
