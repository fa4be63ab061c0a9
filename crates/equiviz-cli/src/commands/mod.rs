//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function. Commands drive a
//! [`SessionController`] and render its state; none of them call the API
//! client directly.

pub mod config;
pub mod dashboard;
pub mod datasets;
pub mod delete;
pub mod login;
pub mod logout;
pub mod records;
pub mod report;
pub mod show;
pub mod status;
pub mod upload;

use crate::config::Config;
use crate::error::Result;
use crate::progress::create_spinner;
use crate::session::SessionController;
use equiviz_common::types::DatasetId;
use std::future::Future;
use tracing::debug;

/// Controller with any persisted session picked up.
///
/// A missing session is not an error here: requests still go out and the
/// backend answers with its own auth error.
pub(crate) fn restored_controller(config: &Config) -> Result<SessionController> {
    let mut controller = SessionController::from_config(config)?;
    if !controller.restore() {
        debug!("No stored session; requests will be sent without credentials");
    }
    Ok(controller)
}

/// Parse a dataset id argument
pub(crate) fn parse_id(id: &str) -> Result<DatasetId> {
    Ok(id.parse::<DatasetId>()?)
}

/// Await `future` behind a spinner
pub(crate) async fn with_spinner<T>(message: &str, future: impl Future<Output = T>) -> T {
    let spinner = create_spinner(message);
    let output = future.await;
    spinner.finish_and_clear();
    output
}
