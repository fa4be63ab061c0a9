//! `equiviz show` command implementation
//!
//! Selects a dataset (detail, then analytics) and renders the analytics view.

use crate::commands::{parse_id, restored_controller, with_spinner};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::views::analytics::{self, AnalyticsView, ChartKind};
use colored::Colorize;

/// Show analytics for one dataset
pub async fn run(config: &Config, id: &str, chart: &str, records: bool) -> Result<()> {
    let id = parse_id(id)?;
    let chart: ChartKind = chart.parse().map_err(|e: String| CliError::Other(anyhow::anyhow!(e)))?;

    let mut controller = restored_controller(config)?;
    with_spinner("Loading analytics...", controller.select(id)).await?;

    let Some(selection) = controller.state().selection() else {
        return Ok(());
    };
    let detail = selection.detail.as_ref();

    if let Some(detail) = detail {
        println!();
        println!("{}", detail.summary.name.bold());
        println!(
            "Uploaded {} by {}",
            detail.summary.uploaded_at.format("%Y-%m-%d %H:%M"),
            detail.summary.uploaded_by
        );
    }

    match AnalyticsView::derive(detail, selection.analytics.as_ref()) {
        Some(view) => analytics::display(&view, chart),
        None => println!("{}", "No analytics available for this dataset.".yellow()),
    }

    if records {
        if let Some(detail) = detail {
            println!("{}", "Equipment Records".bold());
            analytics::display_records(&detail.equipment_records);
        }
    }

    Ok(())
}
