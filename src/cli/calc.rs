//! CLI command for running a calculation
//!
//! Builds a calculator from settings (or a saved calculation), applies the
//! command-line inputs, prints the result, then optionally saves and exports.

use std::path::PathBuf;

use clap::Args;
use tracing::warn;

use crate::config::settings::Settings;
use crate::display::{format_breakdown, format_chart, format_furnishing, format_mahr, format_summary};
use crate::error::BudgetResult;
use crate::export::{export_to_file, ExportFormat};
use crate::models::{Amount, BudgetMode, Currency, Language, MahrView, TermKind};
use crate::services::{CalculationService, Calculator, MahrPart};
use crate::storage::Storage;

use super::parse_amount;

/// Inputs of the `calc` command
#[derive(Args, Debug, Default)]
pub struct CalcArgs {
    /// Start from a saved calculation (name or ID)
    #[arg(long)]
    pub load: Option<String>,

    /// Budget preset: economic, medium or luxury
    #[arg(short, long)]
    pub preset: Option<BudgetMode>,

    /// Gold price per gram in SYP
    #[arg(long)]
    pub gold_price: Option<f64>,

    /// SYP per one USD
    #[arg(long)]
    pub dollar_rate: Option<f64>,

    /// Display currency: SYP or USD
    #[arg(short, long)]
    pub currency: Option<Currency>,

    /// Output language: ar or en
    #[arg(short, long)]
    pub lang: Option<Language>,

    /// The advance is not paid: count goldsmithing and clothing instead
    #[arg(long, conflicts_with = "advance")]
    pub no_advance: bool,

    /// The advance is paid and counted in the total
    #[arg(long)]
    pub advance: bool,

    /// Not renting a home
    #[arg(long, conflicts_with = "with_rent")]
    pub no_rent: bool,

    /// Renting a home: count the months paid up front
    #[arg(long)]
    pub with_rent: bool,

    /// Mahr advance in grams of gold
    #[arg(long, value_name = "GRAMS")]
    pub gold_advance: Option<f64>,

    /// Mahr deferred in grams of gold
    #[arg(long, value_name = "GRAMS")]
    pub gold_deferred: Option<f64>,

    /// How the mahr is entered and shown: gold, usd or syp
    #[arg(long)]
    pub mahr_view: Option<MahrView>,

    /// Mahr advance entered in the mahr view's unit
    #[arg(long, value_name = "VALUE")]
    pub advance_value: Option<f64>,

    /// Mahr deferred entered in the mahr view's unit
    #[arg(long, value_name = "VALUE")]
    pub deferred_value: Option<f64>,

    /// Home furnishing total used when there are no furnishing items
    #[arg(long, value_parser = parse_amount, value_name = "AMOUNT")]
    pub furnishing: Option<Amount>,

    /// Wedding cost, e.g. "30000000" or "2000 USD"
    #[arg(long, value_parser = parse_amount, value_name = "AMOUNT")]
    pub wedding: Option<Amount>,

    /// Honeymoon cost
    #[arg(long, value_parser = parse_amount, value_name = "AMOUNT")]
    pub honeymoon: Option<Amount>,

    /// Additional expenses
    #[arg(long, value_parser = parse_amount, value_name = "AMOUNT")]
    pub additional: Option<Amount>,

    /// Monthly rent
    #[arg(long, value_parser = parse_amount, value_name = "AMOUNT")]
    pub rent: Option<Amount>,

    /// Months of rent paid in advance
    #[arg(long)]
    pub rent_months: Option<u32>,

    /// Goldsmithing gold in grams (counted when the advance is not paid)
    #[arg(long, value_name = "GRAMS")]
    pub goldsmithing_grams: Option<f64>,

    /// Clothing cost (counted when the advance is not paid)
    #[arg(long, value_parser = parse_amount, value_name = "AMOUNT")]
    pub clothing: Option<Amount>,

    /// Currency the goldsmithing and clothing total is shown in
    #[arg(long)]
    pub goldsmithing_currency: Option<Currency>,

    /// Currency of the furnishing section totals
    #[arg(long)]
    pub furnishing_currency: Option<Currency>,

    /// Also print the proportional chart
    #[arg(long)]
    pub chart: bool,

    /// Also print the mahr and furnishing sections
    #[arg(long)]
    pub details: bool,

    /// Save the calculation under this name
    #[arg(long, value_name = "NAME")]
    pub save: Option<String>,

    /// Write a print-ready HTML report
    #[arg(long, value_name = "PATH")]
    pub html: Option<PathBuf>,

    /// Write the breakdown as CSV
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Write the full calculation as JSON
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Write the full calculation as YAML
    #[arg(long, value_name = "PATH")]
    pub yaml: Option<PathBuf>,

    /// Currency of exported files (defaults to the display currency)
    #[arg(long)]
    pub export_currency: Option<Currency>,
}

/// Handle the calc command
pub fn handle_calc_command(storage: &Storage, settings: &Settings, args: CalcArgs) -> BudgetResult<()> {
    let service = CalculationService::new(storage);

    let mut calculator = match &args.load {
        Some(query) => service.open(query)?,
        None => Calculator::with_preset(
            settings.exchange_context()?,
            settings.language,
            settings.budget_mode,
        ),
    };

    apply_args(&mut calculator, &args)?;

    let language = calculator.language();
    let totals = calculator.totals();

    if let Some(name) = calculator.name() {
        println!("{}", name);
        println!();
    }
    print!("{}", format_summary(&totals, language));
    println!();
    print!("{}", format_breakdown(&totals, language));

    if args.chart {
        println!();
        print!("{}", format_chart(&totals, language));
    }

    if args.details {
        println!();
        print!("{}", format_mahr(&calculator));
        println!();
        print!(
            "{}",
            format_furnishing(
                calculator.furnishing(),
                calculator.inputs().home_furnishing.amount,
                calculator.exchange().dollar_rate,
                language,
            )
        );
    }

    if let Some(name) = &args.save {
        match service.save(&mut calculator, name) {
            Ok(saved) => {
                println!();
                println!("Saved calculation: {} ({})", saved.name, saved.id);
            }
            Err(e) => {
                warn!(error = %e, "Failed to save calculation");
                println!();
                println!("Warning: could not save calculation: {}", e);
            }
        }
    }

    let export_currency = args
        .export_currency
        .unwrap_or(calculator.exchange().display_currency);
    let exports = [
        (ExportFormat::Html, &args.html),
        (ExportFormat::Csv, &args.csv),
        (ExportFormat::Json, &args.json),
        (ExportFormat::Yaml, &args.yaml),
    ];
    for (format, path) in exports {
        let Some(path) = path else { continue };
        match export_to_file(&calculator, format, export_currency, path) {
            Ok(()) => println!("{} exported to: {}", format.name(), path.display()),
            Err(e) => {
                warn!(error = %e, format = format.name(), "Export failed");
                println!("Warning: {} export failed: {}", format.name(), e);
            }
        }
    }

    Ok(())
}

/// Apply command-line inputs to a calculator, in dependency order
pub fn apply_args(calculator: &mut Calculator, args: &CalcArgs) -> BudgetResult<()> {
    if let Some(language) = args.lang {
        calculator.set_language(language);
    }
    if let Some(price) = args.gold_price {
        calculator.set_gold_price(price)?;
    }
    if let Some(rate) = args.dollar_rate {
        calculator.set_dollar_rate(rate)?;
    }
    if let Some(currency) = args.currency {
        calculator.set_display_currency(currency);
    }

    // Presets overwrite values, so explicit values come after
    if let Some(mode) = args.preset {
        calculator.apply_preset(mode);
    }

    // Toggles left unset keep the loaded calculation's state
    if args.advance || args.no_advance {
        calculator.set_advance_paid(args.advance);
    }
    if args.with_rent || args.no_rent {
        calculator.set_rent_enabled(args.with_rent);
    }

    if let Some(view) = args.mahr_view {
        calculator.set_mahr_view(MahrPart::Advance, view);
        calculator.set_mahr_view(MahrPart::Deferred, view);
    }
    if let Some(grams) = args.gold_advance {
        calculator.set_mahr_grams(MahrPart::Advance, grams);
    }
    if let Some(grams) = args.gold_deferred {
        calculator.set_mahr_grams(MahrPart::Deferred, grams);
    }
    if let Some(value) = args.advance_value {
        calculator.set_mahr_input(MahrPart::Advance, value);
    }
    if let Some(value) = args.deferred_value {
        calculator.set_mahr_input(MahrPart::Deferred, value);
    }

    let terms = [
        (TermKind::HomeFurnishing, args.furnishing),
        (TermKind::WeddingCost, args.wedding),
        (TermKind::Honeymoon, args.honeymoon),
        (TermKind::AdditionalExpenses, args.additional),
        (TermKind::Rent, args.rent),
        (TermKind::Clothing, args.clothing),
    ];
    for (kind, amount) in terms {
        let Some(amount) = amount else { continue };
        if calculator.set_term_amount(kind, amount)?.is_none() {
            println!(
                "Note: {} is calculated from furnishing items; the given value is ignored.",
                kind.label(Language::En)
            );
        }
    }

    if let Some(months) = args.rent_months {
        calculator.set_rent_months(months);
    }
    if let Some(grams) = args.goldsmithing_grams {
        calculator.set_goldsmithing_grams(grams);
    }
    if let Some(currency) = args.goldsmithing_currency {
        calculator.set_goldsmithing_total_currency(currency);
    }
    if let Some(currency) = args.furnishing_currency {
        calculator.set_furnishing_currency(currency);
    }

    Ok(())
}
