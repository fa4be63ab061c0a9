//! `equiviz logout` command implementation

use crate::commands::restored_controller;
use crate::config::Config;
use crate::error::Result;
use colored::Colorize;

/// Forget the stored session; safe to run when already logged out
pub async fn run(config: &Config) -> Result<()> {
    let mut controller = restored_controller(config)?;
    let username = controller.state().session().username().map(str::to_string);

    controller.logout()?;

    match username {
        Some(username) => println!("{} Logged out {}", "✓".green(), username.bold()),
        None => println!("Not logged in."),
    }
    Ok(())
}
