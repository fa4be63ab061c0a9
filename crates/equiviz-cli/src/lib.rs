//! Equiviz CLI Library
//!
//! Terminal client for the Chemical Equipment Parameter Visualizer backend.
//!
//! # Overview
//!
//! - **Session**: log in with a credentials probe, stay logged in across runs (`equiviz login/logout/status`)
//! - **Datasets**: list, inspect and delete uploaded datasets (`equiviz datasets/show/records/delete`)
//! - **Upload**: send a CSV of equipment readings as a new dataset (`equiviz upload`)
//! - **Reports**: download the server-generated PDF (`equiviz report`)
//! - **Dashboard**: interactive loop over all of the above (`equiviz dashboard`)
//!
//! All state lives in a [`session::SessionController`]; commands and the
//! dashboard only build [`session::Intent`]s and render what it holds.

pub mod api;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod progress;
pub mod session;
pub mod views;

// Re-export commonly used types
pub use config::Config;
pub use error::{CliError, Result};
pub use session::{Intent, SessionController};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Equiviz - Chemical Equipment Parameter Visualizer
#[derive(Parser, Debug)]
#[command(name = "equiviz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// API base URL (including the /api prefix)
    #[arg(long, env = "EQUIVIZ_SERVER_URL", global = true)]
    pub server_url: Option<String>,

    /// Directory holding the persisted session
    #[arg(long, env = "EQUIVIZ_STATE_DIR", global = true)]
    pub state_dir: Option<PathBuf>,

    /// Print the command reference as Markdown
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        /// Username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Password (prompted if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show session and server information
    Status,

    /// List uploaded datasets
    Datasets {
        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show analytics for a dataset
    Show {
        /// Dataset ID
        id: String,

        /// Chart to render (all, distribution, averages, scatter)
        #[arg(short, long, default_value = "all")]
        chart: String,

        /// Also list the equipment records
        #[arg(short, long)]
        records: bool,
    },

    /// List the equipment records of a dataset
    Records {
        /// Dataset ID
        id: String,
    },

    /// Upload a CSV file as a new dataset
    Upload {
        /// CSV file to upload
        file: PathBuf,

        /// Dataset name
        #[arg(short, long)]
        name: String,
    },

    /// Delete a dataset
    Delete {
        /// Dataset ID
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Download the PDF report of a dataset
    Report {
        /// Dataset ID
        id: String,

        /// Output file path (defaults to report_<name>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive dashboard
    Dashboard,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Get configuration value
    Get {
        /// Configuration key (server_url, state_dir, verbose)
        key: String,
    },

    /// Show all configuration
    Show,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_show_with_chart() {
        let cli = Cli::try_parse_from(["equiviz", "show", "3", "--chart", "scatter", "--records"]).unwrap();
        match cli.command {
            Some(Commands::Show { id, chart, records }) => {
                assert_eq!(id, "3");
                assert_eq!(chart, "scatter");
                assert!(records);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_upload_requires_name() {
        assert!(Cli::try_parse_from(["equiviz", "upload", "plant.csv"]).is_err());
    }
}
