//! `equiviz report` command implementation

use crate::commands::{parse_id, restored_controller, with_spinner};
use crate::config::Config;
use crate::error::Result;
use crate::progress::format_bytes;
use crate::session::Outcome;
use colored::Colorize;
use std::path::PathBuf;
use tracing::warn;

/// Download the PDF report of one dataset
pub async fn run(config: &Config, id: &str, output: Option<PathBuf>) -> Result<()> {
    let id = parse_id(id)?;
    let mut controller = restored_controller(config)?;

    // The list only supplies the default file name
    if output.is_none() {
        if let Err(e) = with_spinner("Loading datasets...", controller.reload()).await {
            warn!(error = %e, "Could not look up dataset name for the report file");
        }
    }

    let outcome = with_spinner("Downloading report...", controller.download_report(id, output)).await?;
    if let Outcome::ReportSaved { path, bytes } = outcome {
        println!(
            "{} Saved {} ({})",
            "✓".green(),
            path.display().to_string().bold(),
            format_bytes(bytes)
        );
    }

    Ok(())
}
