//! Terminal views
//!
//! Views render state and build intents; they never call the API themselves.

pub mod analytics;
pub mod collection;
pub mod upload;

pub use analytics::{AnalyticsView, ChartKind};
pub use collection::ConfirmedDeletion;
pub use upload::{UploadForm, UploadRequest};
