//! Configuration CLI commands

use clap::Subcommand;

use crate::config::paths::BudgetPaths;
use crate::config::settings::Settings;
use crate::error::BudgetResult;
use crate::models::currency::format_grouped;

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,

    /// Change a setting
    Set {
        /// One of: gold-price, dollar-rate, currency, language, budget-mode
        key: String,
        /// New value
        value: String,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &BudgetPaths,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> BudgetResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("Wedding Budget Configuration");
            println!("============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  Gold price:       {} SYP/gram", format_grouped(settings.gold_price));
            println!("  Dollar rate:      {} SYP/USD", format_grouped(settings.dollar_rate));
            println!("  Display currency: {}", settings.display_currency);
            println!("  Language:         {}", settings.language);
            println!("  Budget mode:      {}", settings.budget_mode);
        }

        ConfigCommands::Set { key, value } => {
            settings.set(&key, &value)?;
            settings.save(paths)?;
            println!("Updated {} = {}", key, value);
        }
    }

    Ok(())
}
