//! `equiviz delete` command implementation

use crate::commands::{parse_id, restored_controller, with_spinner};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::views::collection::{confirm_deletion, preconfirmed, prompt_confirmation};
use colored::Colorize;

/// Delete a dataset after confirmation
pub async fn run(config: &Config, id: &str, yes: bool) -> Result<()> {
    let id = parse_id(id)?;
    let mut controller = restored_controller(config)?;
    with_spinner("Loading datasets...", controller.reload()).await?;

    let target = controller
        .state()
        .find_dataset(id)
        .cloned()
        .ok_or(CliError::DatasetNotFound(id))?;

    let deletion = if yes {
        confirm_deletion(&target, preconfirmed)?
    } else {
        confirm_deletion(&target, prompt_confirmation)?
    };

    let Some(deletion) = deletion else {
        println!("Deletion cancelled.");
        return Ok(());
    };

    with_spinner("Deleting...", controller.delete(deletion)).await?;
    println!("{} Deleted {}", "✓".green(), target.name.bold());
    println!("  {} dataset(s) remaining", controller.state().datasets().len());

    Ok(())
}
