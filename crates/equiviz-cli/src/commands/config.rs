//! `equiviz config` command implementation
//!
//! Configuration comes from flags and environment variables; these commands
//! only print the effective values.

use crate::config::{Config, SERVER_URL_ENV, STATE_DIR_ENV};
use crate::error::{CliError, Result};
use colored::Colorize;

/// Get configuration value
pub fn get(config: &Config, key: &str) -> Result<()> {
    println!("{}", value_of(config, key)?);
    Ok(())
}

/// Show all configuration
pub fn show(config: &Config) -> Result<()> {
    println!("{}", "Equiviz Configuration:".cyan().bold());
    println!();
    println!("{:<15} {}", "server_url:", config.server_url());
    println!("{:<15} {}", "state_dir:", config.state_dir().display());
    println!("{:<15} {}", "verbose:", config.is_verbose());
    println!();
    println!("{}", "Environment Variables:".cyan());
    println!("  {:<20} - API base URL", SERVER_URL_ENV);
    println!("  {:<20} - Session directory", STATE_DIR_ENV);
    println!("  {:<20} - Log level, output, format, dir, filter", "EQUIVIZ_LOG_*");

    Ok(())
}

fn value_of(config: &Config, key: &str) -> Result<String> {
    match key {
        "server_url" => Ok(config.server_url().to_string()),
        "state_dir" => Ok(config.state_dir().display().to_string()),
        "verbose" => Ok(config.is_verbose().to_string()),
        _ => Err(CliError::config(format!("Unknown config key: {}", key))),
    }
}
