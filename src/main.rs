use anyhow::Result;
use clap::{Parser, Subcommand};

use wedding_budget::cli::{
    handle_calc_command, handle_config_command, handle_convert_command, handle_furnishing_command,
    handle_presets_command, handle_saved_command, parse_amount, CalcArgs,
};
use wedding_budget::config::{paths::BudgetPaths, settings::Settings};
use wedding_budget::log::init_logging;
use wedding_budget::models::{Amount, Currency, Language};
use wedding_budget::storage::Storage;

#[derive(Parser)]
#[command(
    name = "wedding-budget",
    author = "Kaylee Beyene",
    version,
    about = "Bilingual wedding budget calculator (SYP / USD)",
    long_about = "Wedding Budget estimates the total cost of a wedding: the gold mahr, \
                  home furnishing with installments, the wedding, honeymoon, rent and \
                  other expenses. Totals are shown in Syrian Pounds or US Dollars, \
                  in Arabic or English."
)]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a budget, optionally saving and exporting it
    Calc(CalcArgs),

    /// Show the budget presets and their totals
    Presets {
        /// Output language: ar or en
        #[arg(short, long)]
        lang: Option<Language>,
    },

    /// Convert an amount between SYP and USD
    Convert {
        /// Amount, e.g. "100 USD" or "1500000"
        #[arg(value_parser = parse_amount)]
        amount: Amount,
        /// Target currency (defaults to the other one)
        #[arg(short, long)]
        to: Option<Currency>,
        /// SYP per one USD (defaults to the configured rate)
        #[arg(short, long)]
        rate: Option<f64>,
        /// Output language: ar or en
        #[arg(short, long)]
        lang: Option<Language>,
    },

    /// Saved calculation commands
    #[command(subcommand)]
    Saved(wedding_budget::cli::SavedCommands),

    /// Furnishing category and item commands
    #[command(subcommand)]
    Furnishing(wedding_budget::cli::FurnishingCommands),

    /// Show or change configuration
    #[command(subcommand)]
    Config(wedding_budget::cli::ConfigCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Initialize paths and settings
    let paths = BudgetPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Calc(args)) => {
            handle_calc_command(&storage, &settings, args)?;
        }
        Some(Commands::Presets { lang }) => {
            handle_presets_command(&settings, lang)?;
        }
        Some(Commands::Convert {
            amount,
            to,
            rate,
            lang,
        }) => {
            handle_convert_command(&settings, amount, to, rate, lang)?;
        }
        Some(Commands::Saved(cmd)) => {
            handle_saved_command(&storage, settings.language, cmd)?;
        }
        Some(Commands::Furnishing(cmd)) => {
            handle_furnishing_command(&storage, cmd)?;
        }
        Some(Commands::Config(cmd)) => {
            handle_config_command(&paths, &mut settings, cmd)?;
        }
        None => {
            println!("Wedding Budget - bilingual wedding cost calculator");
            println!();
            println!("Run 'wedding-budget --help' for usage information.");
            println!("Run 'wedding-budget calc --lang en' for a quick estimate.");
        }
    }

    Ok(())
}
