//! `equiviz login` command implementation

use crate::commands::with_spinner;
use crate::config::Config;
use crate::error::Result;
use crate::session::SessionController;
use colored::Colorize;
use inquire::{Password, PasswordDisplayMode, Text};

/// Log in with a credentials probe and load the dataset list
pub async fn run(config: &Config, username: Option<String>, password: Option<String>) -> Result<()> {
    let username = match username {
        Some(username) => username,
        None => Text::new("Username:").prompt()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new("Password:")
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()?,
    };

    let mut controller = SessionController::from_config(config)?;
    with_spinner("Logging in...", controller.login(&username, &password)).await?;

    println!("{} Logged in as {}", "✓".green(), username.bold());
    match controller.state().banner() {
        Some(banner) => println!("{} {}", "!".yellow(), banner.message().yellow()),
        None => println!("  {} dataset(s) available", controller.state().datasets().len()),
    }

    Ok(())
}
