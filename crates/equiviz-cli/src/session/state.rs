//! Session state container
//!
//! All client-side state lives in one [`AppState`] owned by the controller.
//! Every mutation is a plain method here with no I/O, so transitions can be
//! tested without a server.
//!
//! Invariants:
//! - Analytics is only ever shown for the current selection.
//! - Selection results are applied only when their token is still current;
//!   logout and deletion of the selected dataset retire outstanding tokens.
//! - The dataset list is replaced wholesale on every load, and never holds an
//!   id the server has confirmed deleted.

use crate::error::Operation;
use equiviz_common::types::{AnalyticsAggregate, DatasetDetail, DatasetId, DatasetSummary};
use tracing::debug;

/// Authentication status
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Unauthenticated,
    Authenticated { username: String },
}

impl SessionStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionStatus::Authenticated { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            SessionStatus::Authenticated { username } => Some(username),
            SessionStatus::Unauthenticated => None,
        }
    }
}

/// Identifies one selection attempt; newer tokens compare greater
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectionToken(u64);

/// Handed out by [`AppState::begin_selection`], redeemed by [`AppState::finish_selection`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTicket {
    pub token: SelectionToken,
    pub id: DatasetId,
}

/// The currently selected dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub token: SelectionToken,
    pub id: DatasetId,
    /// Summary row that was clicked, if it was in the list
    pub summary: Option<DatasetSummary>,
    pub detail: Option<DatasetDetail>,
    pub analytics: Option<AnalyticsAggregate>,
}

impl Selection {
    /// Display name from the best information available
    pub fn name(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .map(|d| d.summary.name.as_str())
            .or_else(|| self.summary.as_ref().map(|s| s.name.as_str()))
    }

    /// Both halves fetched
    pub fn is_loaded(&self) -> bool {
        self.detail.is_some() && self.analytics.is_some()
    }
}

/// Dismissible error banner with a fixed per-operation message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banner {
    pub operation: Operation,
}

impl Banner {
    pub fn message(&self) -> &'static str {
        self.operation.banner_message()
    }
}

/// User actions that can be in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Reload,
    Login,
    Upload,
    Delete,
    Select,
    Download,
}

/// One busy flag per action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusyFlags {
    pub reload: bool,
    pub login: bool,
    pub upload: bool,
    pub delete: bool,
    pub select: bool,
    pub download: bool,
}

impl BusyFlags {
    fn slot(&mut self, action: Action) -> &mut bool {
        match action {
            Action::Reload => &mut self.reload,
            Action::Login => &mut self.login,
            Action::Upload => &mut self.upload,
            Action::Delete => &mut self.delete,
            Action::Select => &mut self.select,
            Action::Download => &mut self.download,
        }
    }

    pub fn is_busy(&self, action: Action) -> bool {
        match action {
            Action::Reload => self.reload,
            Action::Login => self.login,
            Action::Upload => self.upload,
            Action::Delete => self.delete,
            Action::Select => self.select,
            Action::Download => self.download,
        }
    }

    pub fn set(&mut self, action: Action, busy: bool) {
        *self.slot(action) = busy;
    }

    pub fn any(&self) -> bool {
        self.reload || self.login || self.upload || self.delete || self.select || self.download
    }
}

/// Result of redeeming a selection ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionApplied {
    /// Ticket was current; state updated
    Applied,
    /// A newer selection, a deletion, or a logout superseded the ticket
    Stale,
}

/// Everything the views render
#[derive(Debug, Clone, Default)]
pub struct AppState {
    session: SessionStatus,
    datasets: Vec<DatasetSummary>,
    selection: Option<Selection>,
    banner: Option<Banner>,
    busy: BusyFlags,
    /// Last token handed out; survives logout so old tickets stay stale
    last_token: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn session(&self) -> &SessionStatus {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn datasets(&self) -> &[DatasetSummary] {
        &self.datasets
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn selected_id(&self) -> Option<DatasetId> {
        self.selection.as_ref().map(|s| s.id)
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn busy(&self) -> &BusyFlags {
        &self.busy
    }

    pub fn find_dataset(&self, id: DatasetId) -> Option<&DatasetSummary> {
        self.datasets.iter().find(|d| d.id == id)
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Unauthenticated -> Authenticated
    pub fn authenticate(&mut self, username: impl Into<String>) {
        self.session = SessionStatus::Authenticated {
            username: username.into(),
        };
    }

    /// Drop everything except the token counter
    pub fn reset(&mut self) {
        let last_token = self.last_token;
        *self = Self {
            last_token,
            ..Self::default()
        };
    }

    /// Replace the dataset list wholesale
    pub fn set_datasets(&mut self, datasets: Vec<DatasetSummary>) {
        debug!(count = datasets.len(), "Dataset list replaced");
        self.datasets = datasets;
    }

    pub fn set_busy(&mut self, action: Action, busy: bool) {
        self.busy.set(action, busy);
    }

    pub fn show_banner(&mut self, operation: Operation) {
        self.banner = Some(Banner { operation });
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Start selecting `id`: the clicked summary is shown at once, detail and
    /// analytics are cleared until the new ones arrive.
    pub fn begin_selection(&mut self, id: DatasetId) -> SelectionTicket {
        self.last_token += 1;
        let token = SelectionToken(self.last_token);

        self.selection = Some(Selection {
            token,
            id,
            summary: self.find_dataset(id).cloned(),
            detail: None,
            analytics: None,
        });
        self.busy.select = true;
        self.banner = None;

        SelectionTicket { token, id }
    }

    /// Apply fetched detail and analytics together, if the ticket is current
    pub fn finish_selection(
        &mut self,
        ticket: SelectionTicket,
        detail: Option<DatasetDetail>,
        analytics: Option<AnalyticsAggregate>,
    ) -> SelectionApplied {
        let Some(selection) = self.selection.as_mut().filter(|s| s.token == ticket.token) else {
            debug!(dataset_id = %ticket.id, "Discarding stale selection result");
            return SelectionApplied::Stale;
        };

        selection.detail = detail;
        selection.analytics = analytics;
        self.busy.select = false;
        SelectionApplied::Applied
    }

    /// Clear selection and its analytics
    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.busy.select = false;
    }

    /// A dataset was deleted on the server. Drops it from the current list
    /// and clears the selection if it pointed at `id`; the reload that
    /// follows replaces the list wholesale.
    pub fn dataset_deleted(&mut self, id: DatasetId) {
        self.datasets.retain(|d| d.id != id);
        if self.selected_id() == Some(id) {
            debug!(dataset_id = %id, "Selected dataset deleted; clearing selection");
            self.clear_selection();
        }
    }
}
