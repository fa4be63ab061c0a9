//! Wire and domain types shared across Equiviz
//!
//! All of these are read-only snapshots of server state. The client never
//! mutates them; a re-fetch replaces them wholesale.

mod analytics;
mod dataset;

pub use analytics::{AnalyticsAggregate, ParameterStats, TypeCount};
pub use dataset::{DatasetDetail, DatasetId, DatasetSummary, EquipmentRecord};
