//! `equiviz status` command implementation
//!
//! Shows the stored session and where requests go. Makes no requests.

use crate::commands::restored_controller;
use crate::config::Config;
use crate::credentials::CREDENTIALS_FILE;
use crate::error::Result;
use colored::Colorize;

/// Show session status
pub async fn run(config: &Config) -> Result<()> {
    let controller = restored_controller(config)?;

    println!("{}", "Equiviz Status:".cyan().bold());
    println!();
    match controller.state().session().username() {
        Some(username) => println!("  Session:  {} {}", "logged in as".green(), username.bold()),
        None => {
            println!("  Session:  {}", "not logged in".yellow());
            println!("  Run 'equiviz login' to start a session.");
        },
    }
    println!("  Server:   {}", controller.client().base_url());
    println!(
        "  Session file: {}",
        config.state_dir().join(CREDENTIALS_FILE).display()
    );

    Ok(())
}
