//! Dataset collection view
//!
//! Renders the dataset list exactly in the order the server returned it, and
//! owns the confirmation step that must precede every deletion.

use crate::error::Result;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use equiviz_common::types::{DatasetId, DatasetSummary};
use inquire::Confirm;

/// Proof that the user confirmed a deletion.
///
/// Fields are private; the only way to get one is [`confirm_deletion`], so a
/// `Delete` intent cannot be built without asking first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedDeletion {
    id: DatasetId,
    name: String,
}

impl ConfirmedDeletion {
    pub fn id(&self) -> DatasetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Question shown before deleting `summary`
pub fn confirmation_question(summary: &DatasetSummary) -> String {
    format!("Are you sure you want to delete \"{}\"?", summary.name)
}

/// Ask `confirm` and, if it agrees, hand back a deletion token
pub fn confirm_deletion<F>(summary: &DatasetSummary, confirm: F) -> Result<Option<ConfirmedDeletion>>
where
    F: FnOnce(&DatasetSummary) -> Result<bool>,
{
    if !confirm(summary)? {
        return Ok(None);
    }

    Ok(Some(ConfirmedDeletion {
        id: summary.id,
        name: summary.name.clone(),
    }))
}

/// Interactive yes/no prompt, defaulting to no
pub fn prompt_confirmation(summary: &DatasetSummary) -> Result<bool> {
    let answer = Confirm::new(&confirmation_question(summary))
        .with_default(false)
        .with_help_message("The dataset and its equipment records are removed on the server")
        .prompt()?;
    Ok(answer)
}

/// `--yes` on the command line
pub fn preconfirmed(_summary: &DatasetSummary) -> Result<bool> {
    Ok(true)
}

/// Build the dataset table; `selected` gets a marker in the first column
pub fn render_table(datasets: &[DatasetSummary], selected: Option<DatasetId>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            "", "ID", "Name", "Uploaded", "By", "Equipment", "Avg Flowrate", "Avg Pressure", "Avg Temp",
        ]);

    for dataset in datasets {
        let is_selected = selected == Some(dataset.id);
        let marker = if is_selected {
            Cell::new("▶").fg(Color::Green)
        } else {
            Cell::new("")
        };

        table.add_row(vec![
            marker,
            Cell::new(dataset.id),
            Cell::new(&dataset.name),
            Cell::new(dataset.uploaded_at.format("%Y-%m-%d %H:%M")),
            Cell::new(&dataset.uploaded_by),
            Cell::new(dataset.total_equipment),
            Cell::new(format!("{:.2}", dataset.avg_flowrate)),
            Cell::new(format!("{:.2}", dataset.avg_pressure)),
            Cell::new(format!("{:.2}", dataset.avg_temperature)),
        ]);
    }

    table
}

/// Print the list, or a hint when it is empty
pub fn display_table(datasets: &[DatasetSummary], selected: Option<DatasetId>) {
    if datasets.is_empty() {
        println!("{}", "No datasets uploaded yet.".yellow());
        println!("Upload one with: equiviz upload <FILE> --name <NAME>");
        return;
    }

    println!();
    println!("{}", render_table(datasets, selected));
    println!();
    println!("{} dataset(s)", datasets.len());
}

/// Print the list as pretty JSON
pub fn display_json(datasets: &[DatasetSummary]) -> Result<()> {
    let json = serde_json::to_string_pretty(datasets)?;
    println!("{}", json);
    Ok(())
}
