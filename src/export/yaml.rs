//! YAML Export functionality
//!
//! The JSON export document, rendered as YAML for reading by hand.

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::export::json::CalculationExport;
use crate::models::Currency;
use crate::services::Calculator;

/// Export a calculation to YAML format
pub fn export_yaml<W: Write>(
    calculator: &Calculator,
    currency: Currency,
    writer: &mut W,
) -> BudgetResult<()> {
    let export = CalculationExport::from_calculator(calculator, currency);

    writeln!(writer, "# wedding-budget calculation export")
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BudgetError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BudgetError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExchangeContext, Language};

    #[test]
    fn test_export_yaml() {
        let calc = Calculator::new(ExchangeContext::default(), Language::Ar);

        let mut output = Vec::new();
        export_yaml(&calc, Currency::Syp, &mut output).unwrap();

        let yaml_string = String::from_utf8(output).unwrap();
        assert!(yaml_string.starts_with("# wedding-budget calculation export"));
        assert!(yaml_string.contains("schema_version"));
        assert!(yaml_string.contains("المهر المقدم"));

        let parsed: CalculationExport = serde_yaml::from_str(&yaml_string).unwrap();
        assert_eq!(parsed.totals.currency, Currency::Syp);
    }
}
