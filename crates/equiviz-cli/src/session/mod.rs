//! Session controller, its state container and the intents it handles

pub mod controller;
pub mod intent;
pub mod state;

pub use controller::{SelectionFetch, SessionController};
pub use intent::{Intent, Outcome};
pub use state::{Action, AppState, Banner, BusyFlags, Selection, SelectionApplied, SelectionTicket, SessionStatus};
