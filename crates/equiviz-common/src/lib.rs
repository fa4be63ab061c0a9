//! Equiviz Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, credential encoding, and logging for the Equiviz workspace.
//!
//! # Overview
//!
//! - **Types**: wire/domain types returned by the equipment analytics API
//!   (dataset summaries, details, equipment records, analytics aggregates)
//! - **Auth**: HTTP Basic credential encoding
//! - **Logging**: `tracing` subscriber setup shared by every binary
//!
//! # Example
//!
//! ```no_run
//! use equiviz_common::auth::BasicCredentials;
//!
//! let credentials = BasicCredentials::encode("operator", "s3cret");
//! assert_eq!(credentials.header_value(), format!("Basic {}", credentials.as_str()));
//! ```

pub mod auth;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{CommonError, Result};
