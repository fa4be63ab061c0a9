//! `equiviz datasets` command implementation

use crate::commands::{restored_controller, with_spinner};
use crate::config::Config;
use crate::error::Result;
use crate::views::collection;

/// List datasets in server order
pub async fn run(config: &Config, format: &str) -> Result<()> {
    let mut controller = restored_controller(config)?;
    with_spinner("Loading datasets...", controller.reload()).await?;

    let datasets = controller.state().datasets();
    match format {
        "json" => collection::display_json(datasets),
        _ => {
            collection::display_table(datasets, None);
            Ok(())
        },
    }
}
