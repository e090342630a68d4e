use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

use crate::cli::parser::Commands;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration:\n");
            println!(
                "{}",
                serde_yaml::to_string(&cfg).unwrap_or_else(|_| "<unprintable>".to_string())
            );
        }

        // ---- CHECK CONFIG ----
        if *check {
            let missing = Config::missing_fields()?;

            if missing.is_empty() {
                success("Configuration file is complete.");
            } else {
                warning(format!(
                    "Missing fields (defaults will be used): {}",
                    missing.join(", ")
                ));
            }
        }
    }

    Ok(())
}
