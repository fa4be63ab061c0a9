//! `equiviz upload` command implementation

use crate::commands::{restored_controller, with_spinner};
use crate::config::Config;
use crate::error::Result;
use crate::session::Outcome;
use crate::views::upload::UploadForm;
use colored::Colorize;
use std::path::Path;

/// Validate locally, upload, and show the refreshed list size
pub async fn run(config: &Config, file: &Path, name: &str) -> Result<()> {
    let mut form = UploadForm::new();
    form.set_name(name);
    form.pick_file(file)?;
    let request = form.submit()?;

    let mut controller = restored_controller(config)?;
    let result = with_spinner("Uploading...", controller.upload(request))
        .await
        .map(Outcome::Uploaded);
    form.complete(&result);

    let Outcome::Uploaded(created) = result? else {
        return Ok(());
    };

    println!(
        "{} Uploaded {} (id {}, {} equipment)",
        "✓".green(),
        created.name.bold(),
        created.id,
        created.total_equipment
    );
    if let Some(banner) = controller.state().banner() {
        println!("{} {}", "!".yellow(), banner.message().yellow());
    } else {
        println!("  {} dataset(s) on the server", controller.state().datasets().len());
    }

    Ok(())
}
