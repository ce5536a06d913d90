//! JSON Export functionality
//!
//! Exports one calculation with its furnishing records and computed totals,
//! with schema versioning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::display::breakdown_rows;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Calculation, Currency, FurnishingBook};
use crate::services::Calculator;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full calculation export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Every input of the calculation
    pub calculation: Calculation,

    /// Furnishing categories and items
    pub furnishing: FurnishingBook,

    /// Totals in the export currency
    pub totals: ExportTotals,
}

/// Computed figures, for readers that do not recompute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportTotals {
    pub currency: Currency,
    pub dollar_rate: f64,
    pub total: f64,
    pub total_syp: f64,
    pub installment_remaining: f64,
    pub lines: Vec<ExportLine>,
}

/// One listed breakdown line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportLine {
    pub key: String,
    pub label: String,
    pub value: f64,
    pub percentage: f64,
}

impl CalculationExport {
    /// Snapshot a calculator session with totals in `currency`
    pub fn from_calculator(calculator: &Calculator, currency: Currency) -> Self {
        let name = calculator.name().unwrap_or("wedding-budget");
        let language = calculator.language();
        let totals = calculator.totals_in(currency);

        let lines = breakdown_rows(&totals, language)
            .into_iter()
            .map(|row| ExportLine {
                key: row.kind.key().to_string(),
                label: row.label,
                value: row.value,
                percentage: row.percentage,
            })
            .collect();

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            calculation: calculator.to_calculation(name),
            furnishing: calculator.furnishing().book().clone(),
            totals: ExportTotals {
                currency,
                dollar_rate: totals.dollar_rate,
                total: totals.total_display,
                total_syp: totals.total_syp,
                installment_remaining: totals.to_display(totals.installment_remaining_syp),
                lines,
            },
        }
    }
}

/// Export a calculation to JSON format
pub fn export_json<W: Write>(
    calculator: &Calculator,
    currency: Currency,
    writer: &mut W,
) -> BudgetResult<()> {
    let export = CalculationExport::from_calculator(calculator, currency);

    serde_json::to_writer_pretty(writer, &export)
        .map_err(|e| BudgetError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExchangeContext, Language};

    #[test]
    fn test_export_json() {
        let calc = Calculator::new(ExchangeContext::default(), Language::En);

        let mut output = Vec::new();
        export_json(&calc, Currency::Usd, &mut output).unwrap();

        let parsed: CalculationExport = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(parsed.totals.currency, Currency::Usd);
        assert_eq!(parsed.totals.total_syp, calc.totals().total_syp);
        assert_eq!(parsed.furnishing.items.len(), 3);
        assert!(parsed.totals.lines.iter().any(|l| l.key == "mahr_advance"));
    }

    #[test]
    fn test_export_does_not_touch_session() {
        let calc = Calculator::new(ExchangeContext::default(), Language::En);
        let before = calc.totals();

        let mut output = Vec::new();
        export_json(&calc, Currency::Usd, &mut output).unwrap();

        assert_eq!(calc.totals(), before);
        assert_eq!(calc.exchange().display_currency, Currency::Syp);
    }
}
