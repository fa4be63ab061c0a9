//! `equiviz records` command implementation

use crate::commands::{parse_id, restored_controller, with_spinner};
use crate::config::Config;
use crate::error::Result;
use crate::views::analytics;

/// List the equipment records of one dataset
pub async fn run(config: &Config, id: &str) -> Result<()> {
    let id = parse_id(id)?;
    let mut controller = restored_controller(config)?;

    let records = with_spinner("Loading equipment records...", controller.equipment(id)).await?;
    analytics::display_records(&records);
    Ok(())
}
