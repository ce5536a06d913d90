//! Export module for wedding-budget
//!
//! Every format computes its figures with the calculator's own aggregation,
//! in an export currency that may differ from the on-screen one:
//! - HTML: print-ready report
//! - CSV: cost breakdown rows (spreadsheet-compatible)
//! - JSON / YAML: full calculation with furnishing records and totals

pub mod csv;
pub mod html;
pub mod json;
pub mod yaml;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::info;

use crate::error::{BudgetError, BudgetResult};
use crate::models::Currency;
use crate::services::Calculator;

pub use self::csv::export_breakdown_csv;
pub use html::{export_html, render_html};
pub use json::{export_json, CalculationExport, ExportLine, ExportTotals, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Html => "HTML",
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
            ExportFormat::Yaml => "YAML",
        }
    }
}

/// Write an export file, creating parent directories as needed
pub fn export_to_file(
    calculator: &Calculator,
    format: ExportFormat,
    currency: Currency,
    path: &Path,
) -> BudgetResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| BudgetError::Export(format!("{}: {}", parent.display(), e)))?;
    }

    let file = File::create(path)
        .map_err(|e| BudgetError::Export(format!("{}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Html => export_html(calculator, currency, &mut writer)?,
        ExportFormat::Csv => export_breakdown_csv(calculator, currency, &mut writer)?,
        ExportFormat::Json => export_json(calculator, currency, &mut writer)?,
        ExportFormat::Yaml => export_yaml(calculator, currency, &mut writer)?,
    }

    std::io::Write::flush(&mut writer).map_err(|e| BudgetError::Export(e.to_string()))?;
    info!(format = format.name(), path = %path.display(), %currency, "Exported calculation");
    Ok(())
}
