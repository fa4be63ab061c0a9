//! API client module
//!
//! HTTP client for the equipment analytics backend. Every call goes through
//! [`ApiClient`]; it is the only place that talks to the network.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::ApiClient;
pub use types::*;
