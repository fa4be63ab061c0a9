//! Session controller
//!
//! The only owner of [`AppState`] and the only caller of the API client on
//! behalf of views. Every mutation that succeeds on the server is followed by
//! a full list reload, issued after the mutation's response has arrived.
//!
//! Methods take `&mut self`, so one controller never has two invocations of
//! the same action in flight.

use crate::api::ApiClient;
use crate::config::Config;
use crate::credentials::{CredentialStore, FileCredentialStore};
use crate::error::{CliError, Operation, Result};
use crate::session::intent::{Intent, Outcome};
use crate::session::state::{Action, AppState, SelectionApplied, SelectionTicket};
use crate::views::analytics::report_file_name;
use crate::views::collection::ConfirmedDeletion;
use crate::views::upload::UploadRequest;
use equiviz_common::auth::BasicCredentials;
use equiviz_common::types::{AnalyticsAggregate, DatasetDetail, DatasetId, DatasetSummary, EquipmentRecord};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Message for a login attempt with a blank field
pub const MISSING_LOGIN_FIELDS: &str = "Please enter both username and password";

/// Result of the I/O half of a selection
#[derive(Debug)]
pub struct SelectionFetch {
    pub ticket: SelectionTicket,
    pub detail: Option<DatasetDetail>,
    pub analytics: Option<AnalyticsAggregate>,
    pub error: Option<CliError>,
}

/// Root orchestrator for the session
pub struct SessionController {
    client: ApiClient,
    store: Arc<dyn CredentialStore>,
    state: AppState,
}

impl SessionController {
    pub fn new(server_url: &str, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let client = ApiClient::new(server_url, store.clone())?;
        Ok(Self {
            client,
            store,
            state: AppState::new(),
        })
    }

    /// Controller backed by the credential file in the configured state dir
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = Arc::new(FileCredentialStore::new(config.state_dir()));
        Self::new(config.server_url(), store)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    // ------------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------------

    /// Pick up a persisted session without touching the network.
    /// Returns whether the session is authenticated.
    pub fn restore(&mut self) -> bool {
        if self.store.credentials().is_none() {
            return false;
        }

        let username = self.store.username().unwrap_or_default();
        debug!(username = %username, "Restored persisted session");
        self.state.authenticate(username);
        true
    }

    /// Restore a persisted session and, if there is one, load the list
    pub async fn start(&mut self) -> Result<bool> {
        if !self.restore() {
            return Ok(false);
        }
        self.reload().await?;
        Ok(true)
    }

    /// Probe with the candidate pair; persist and flip state only on success
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(CliError::Auth(MISSING_LOGIN_FIELDS.to_string()));
        }

        let candidate = BasicCredentials::encode(username, password);

        self.state.set_busy(Action::Login, true);
        let probe = self.client.probe(&candidate).await;
        self.state.set_busy(Action::Login, false);

        if let Err(e) = probe {
            warn!(username = %username, error = %e, "Login rejected");
            return Err(e);
        }

        self.store.save(username, &candidate)?;
        self.state.authenticate(username);
        info!(username = %username, "Logged in");

        self.reload_after(Operation::ListDatasets).await;
        Ok(())
    }

    /// Clear credentials and every piece of in-memory state. Idempotent.
    pub fn logout(&mut self) -> Result<()> {
        let username = self.state.session().username().map(str::to_string);
        self.store.clear()?;
        self.state.reset();
        info!(username = ?username, "Logged out");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Dataset list
    // ------------------------------------------------------------------------

    /// Replace the list with the server's; on failure keep the old list and
    /// raise the banner
    pub async fn reload(&mut self) -> Result<()> {
        self.state.set_busy(Action::Reload, true);
        self.state.dismiss_banner();

        let result = self.client.list_datasets().await;
        self.state.set_busy(Action::Reload, false);

        match result {
            Ok(datasets) => {
                self.state.set_datasets(datasets);
                Ok(())
            },
            Err(e) => {
                error!(error = %e, "Failed to load datasets");
                self.state.show_banner(Operation::ListDatasets);
                Err(e)
            },
        }
    }

    /// Reload after a successful mutation; a failure only leaves the banner
    async fn reload_after(&mut self, cause: Operation) {
        if let Err(e) = self.reload().await {
            warn!(after = %cause, error = %e, "Reload after mutation failed");
        }
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Upload a validated request, then reload.
    ///
    /// Failures go back to the upload form rather than the banner.
    pub async fn upload(&mut self, request: UploadRequest) -> Result<DatasetSummary> {
        self.state.set_busy(Action::Upload, true);
        let result = self.send_upload(&request).await;
        self.state.set_busy(Action::Upload, false);

        let created = result?;
        info!(dataset_id = %created.id, name = %created.name, "Dataset uploaded");

        self.reload_after(Operation::Upload).await;
        Ok(created)
    }

    async fn send_upload(&self, request: &UploadRequest) -> Result<DatasetSummary> {
        let contents = tokio::fs::read(&request.file.path).await?;
        debug!(file = %request.file.file_name, bytes = contents.len(), "Uploading CSV");
        self.client
            .upload_dataset(&request.name, &request.file.file_name, contents)
            .await
    }

    /// Delete a confirmed dataset, clear it from state, then reload
    pub async fn delete(&mut self, deletion: ConfirmedDeletion) -> Result<()> {
        let id = deletion.id();

        self.state.set_busy(Action::Delete, true);
        let result = self.client.delete_dataset(id).await;
        self.state.set_busy(Action::Delete, false);

        if let Err(e) = result {
            error!(dataset_id = %id, error = %e, "Failed to delete dataset");
            self.state.show_banner(Operation::Delete);
            return Err(e);
        }

        info!(dataset_id = %id, name = %deletion.name(), "Dataset deleted");
        self.state.dataset_deleted(id);
        self.reload_after(Operation::Delete).await;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    /// Start a selection; the returned ticket goes to [`Self::fetch_selection`]
    pub fn begin_select(&mut self, id: DatasetId) -> SelectionTicket {
        self.state.begin_selection(id)
    }

    /// Fetch detail, then analytics. Touches no state, so it can run while
    /// newer selections start.
    pub async fn fetch_selection(client: &ApiClient, ticket: SelectionTicket) -> SelectionFetch {
        let detail = match client.get_dataset(ticket.id).await {
            Ok(detail) => detail,
            Err(e) => {
                return SelectionFetch {
                    ticket,
                    detail: None,
                    analytics: None,
                    error: Some(e),
                }
            },
        };

        let (analytics, error) = match client.get_analytics(ticket.id).await {
            Ok(analytics) => (Some(analytics), None),
            Err(e) => (None, Some(e)),
        };

        SelectionFetch {
            ticket,
            detail: Some(detail),
            analytics,
            error,
        }
    }

    /// Apply a fetch if its ticket is still current.
    ///
    /// A failed fetch for the current selection raises the banner and
    /// returns the error; a stale one is dropped silently.
    pub fn finish_select(&mut self, fetch: SelectionFetch) -> Result<SelectionApplied> {
        let SelectionFetch {
            ticket,
            detail,
            analytics,
            error,
        } = fetch;

        let applied = self.state.finish_selection(ticket, detail, analytics);
        match (applied, error) {
            (SelectionApplied::Applied, Some(e)) => {
                error!(dataset_id = %ticket.id, error = %e, "Failed to load analytics");
                self.state.show_banner(e.operation().unwrap_or(Operation::GetAnalytics));
                Err(e)
            },
            (applied, _) => Ok(applied),
        }
    }

    /// Select a dataset and load its detail and analytics
    pub async fn select(&mut self, id: DatasetId) -> Result<SelectionApplied> {
        let ticket = self.begin_select(id);
        let fetch = Self::fetch_selection(&self.client, ticket).await;
        self.finish_select(fetch)
    }

    pub fn clear_selection(&mut self) {
        self.state.clear_selection();
    }

    /// Equipment records of one dataset
    pub async fn equipment(&mut self, id: DatasetId) -> Result<Vec<EquipmentRecord>> {
        match self.client.list_equipment(id).await {
            Ok(records) => Ok(records),
            Err(e) => {
                error!(dataset_id = %id, error = %e, "Failed to load equipment records");
                self.state.show_banner(Operation::ListEquipment);
                Err(e)
            },
        }
    }

    // ------------------------------------------------------------------------
    // Report
    // ------------------------------------------------------------------------

    /// Save the PDF report. Only the download flag changes while it runs.
    pub async fn download_report(&mut self, id: DatasetId, destination: Option<PathBuf>) -> Result<Outcome> {
        self.state.set_busy(Action::Download, true);
        let result = self.save_report(id, destination).await;
        self.state.set_busy(Action::Download, false);

        match result {
            Ok((path, bytes)) => {
                info!(dataset_id = %id, path = %path.display(), bytes, "Report saved");
                Ok(Outcome::ReportSaved { path, bytes })
            },
            Err(e) => {
                error!(dataset_id = %id, error = %e, "Failed to download report");
                self.state.show_banner(Operation::DownloadReport);
                Err(e)
            },
        }
    }

    async fn save_report(&self, id: DatasetId, destination: Option<PathBuf>) -> Result<(PathBuf, u64)> {
        let report = self.client.download_report(id).await?;

        let path = match destination {
            Some(path) => path,
            None => PathBuf::from(self.report_name(id, report.file_name)),
        };

        tokio::fs::write(&path, &report.bytes).await?;
        Ok((path, report.bytes.len() as u64))
    }

    /// `report_<name>.pdf` from what is known locally, else the server's name
    fn report_name(&self, id: DatasetId, server_name: Option<String>) -> String {
        let local = self.state.find_dataset(id).map(|d| d.name.as_str()).or_else(|| {
            self.state
                .selection()
                .filter(|s| s.id == id)
                .and_then(|s| s.name())
        });

        // Only the final component of the server's name; never a directory
        let server_name = server_name.and_then(|name| {
            Path::new(&name.replace('\\', "/"))
                .file_name()
                .and_then(|n| n.to_str())
                .filter(|n| !n.trim().is_empty())
                .map(str::to_string)
        });

        match (local, server_name) {
            (Some(name), _) => report_file_name(name),
            (None, Some(name)) => name,
            (None, None) => report_file_name(&id.to_string()),
        }
    }

    // ------------------------------------------------------------------------
    // Intents
    // ------------------------------------------------------------------------

    pub fn dismiss_banner(&mut self) {
        self.state.dismiss_banner();
    }

    /// Single entry point for view intents
    pub async fn handle(&mut self, intent: Intent) -> Result<Outcome> {
        debug!(intent = ?intent, "Handling intent");

        match intent {
            Intent::Login { username, password } => self.login(&username, &password).await?,
            Intent::Logout => self.logout()?,
            Intent::Reload => self.reload().await?,
            Intent::Upload(request) => return self.upload(request).await.map(Outcome::Uploaded),
            Intent::Select(id) => {
                self.select(id).await?;
            },
            Intent::ClearSelection => self.clear_selection(),
            Intent::Delete(deletion) => self.delete(deletion).await?,
            Intent::DownloadReport { id, destination } => return self.download_report(id, destination).await,
            Intent::DismissBanner => self.dismiss_banner(),
        }

        Ok(Outcome::Done)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::credentials::MemoryCredentialStore;
    use crate::views::collection::{confirm_deletion, preconfirmed};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn summary_json(id: u64, name: &str) -> serde_json::Value {
        json!({
            "id": id, "name": name, "uploaded_by": "admin",
            "uploaded_at": "2026-01-05T10:20:30Z", "total_equipment": 5,
            "avg_flowrate": 12.5, "avg_pressure": 4.0, "avg_temperature": 300.1,
            "equipment_types": {"Pump": 3, "Valve": 2}
        })
    }

    fn detail_json(id: u64, name: &str) -> serde_json::Value {
        let mut detail = summary_json(id, name);
        detail["equipment_records"] = json!([
            {"equipment_name": "P-1", "equipment_type": "Pump", "flowrate": 10.0, "pressure": 3.0, "temperature": 298.0}
        ]);
        detail
    }

    fn analytics_json(total: u64) -> serde_json::Value {
        json!({
            "total_equipment": total,
            "avg_flowrate": 12.5, "avg_pressure": 4.0, "avg_temperature": 300.1,
            "min_flowrate": 10.0, "max_flowrate": 15.0,
            "min_pressure": 3.0, "max_pressure": 5.0,
            "min_temperature": 295.0, "max_temperature": 305.0,
            "equipment_types": {"Pump": 3, "Valve": 2}
        })
    }

    /// Store that holds a session but cannot remove it
    struct StuckStore(MemoryCredentialStore);

    impl CredentialStore for StuckStore {
        fn save(&self, username: &str, credentials: &BasicCredentials) -> Result<()> {
            self.0.save(username, credentials)
        }

        fn clear(&self) -> Result<()> {
            Err(CliError::credential_store("read-only state directory"))
        }

        fn credentials(&self) -> Option<BasicCredentials> {
            self.0.credentials()
        }

        fn username(&self) -> Option<String> {
            self.0.username()
        }
    }

    #[test]
    fn test_logout_keeps_session_when_store_cannot_clear() {
        let store = Arc::new(StuckStore(MemoryCredentialStore::with_session(
            "admin",
            BasicCredentials::encode("admin", "admin123"),
        )));
        let mut controller = SessionController::new("http://localhost:8000/api", store).unwrap();
        assert!(controller.restore());

        assert!(matches!(controller.logout(), Err(CliError::CredentialStore(_))));
        assert!(controller.state().is_authenticated());
        assert_eq!(controller.state().session().username(), Some("admin"));
        assert!(controller.store().is_present());
    }

    fn logged_in_controller(server: &MockServer) -> SessionController {
        let store = Arc::new(MemoryCredentialStore::with_session(
            "admin",
            BasicCredentials::encode("admin", "admin123"),
        ));
        let mut controller = SessionController::new(&format!("{}/api", server.uri()), store).unwrap();
        assert!(controller.restore());
        controller
    }

    #[tokio::test]
    async fn test_blank_login_sends_nothing() {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryCredentialStore::new());
        let mut controller = SessionController::new(&format!("{}/api", server.uri()), store.clone()).unwrap();

        let err = controller.login("  ", "secret").await.unwrap_err();
        assert!(matches!(err, CliError::Auth(ref m) if m == MISSING_LOGIN_FIELDS));
        assert!(server.received_requests().await.unwrap().is_empty());
        assert!(!store.is_present());
    }

    #[tokio::test]
    async fn test_restore_without_credentials_stays_unauthenticated() {
        let server = MockServer::start().await;
        let mut controller =
            SessionController::new(&format!("{}/api", server.uri()), Arc::new(MemoryCredentialStore::new())).unwrap();

        assert!(!controller.start().await.unwrap());
        assert!(!controller.state().is_authenticated());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reload_failure_raises_banner_and_keeps_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/datasets/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([summary_json(1, "Plant A")])))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/datasets/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut controller = logged_in_controller(&server);
        controller.reload().await.unwrap();
        assert!(controller.reload().await.is_err());

        assert_eq!(controller.state().datasets().len(), 1);
        assert_eq!(controller.state().banner().unwrap().message(), "Failed to load datasets");
        assert!(!controller.state().busy().reload);
    }

    #[tokio::test]
    async fn test_select_loads_detail_and_analytics() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/datasets/1/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_json(1, "Plant A")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/datasets/1/analytics/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(analytics_json(5)))
            .mount(&server)
            .await;

        let mut controller = logged_in_controller(&server);
        let applied = controller.select(DatasetId(1)).await.unwrap();

        assert_eq!(applied, SelectionApplied::Applied);
        let selection = controller.state().selection().unwrap();
        assert!(selection.is_loaded());
        assert_eq!(selection.detail.as_ref().unwrap().equipment_records.len(), 1);
        assert!(!controller.state().busy().select);
    }

    #[tokio::test]
    async fn test_analytics_failure_keeps_clicked_selection_without_analytics() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/datasets/1/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_json(1, "Plant A")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/datasets/1/analytics/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut controller = logged_in_controller(&server);
        assert!(controller.select(DatasetId(1)).await.is_err());

        let selection = controller.state().selection().unwrap();
        assert_eq!(selection.id, DatasetId(1));
        assert!(selection.analytics.is_none());
        assert_eq!(controller.state().banner().unwrap().message(), "Failed to load analytics");
    }

    #[tokio::test]
    async fn test_detail_failure_skips_analytics() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/datasets/1/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/datasets/1/analytics/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(analytics_json(5)))
            .expect(0)
            .mount(&server)
            .await;

        let mut controller = logged_in_controller(&server);
        let err = controller.select(DatasetId(1)).await.unwrap_err();
        assert_eq!(err.to_string(), "Not found.");
        assert_eq!(controller.state().banner().unwrap().message(), "Failed to load analytics");
    }

    #[tokio::test]
    async fn test_stale_fetch_does_not_overwrite_newer_selection() {
        let server = MockServer::start().await;
        for (id, name, total) in [(1, "A", 1), (2, "B", 2)] {
            Mock::given(method("GET"))
                .and(path(format!("/api/datasets/{id}/")))
                .respond_with(ResponseTemplate::new(200).set_body_json(detail_json(id, name)))
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path(format!("/api/datasets/{id}/analytics/")))
                .respond_with(ResponseTemplate::new(200).set_body_json(analytics_json(total)))
                .mount(&server)
                .await;
        }

        let mut controller = logged_in_controller(&server);
        let ticket_a = controller.begin_select(DatasetId(1));
        let ticket_b = controller.begin_select(DatasetId(2));

        let fetch_a = SessionController::fetch_selection(controller.client(), ticket_a).await;
        let fetch_b = SessionController::fetch_selection(controller.client(), ticket_b).await;

        // B resolves first, A arrives late
        assert_eq!(controller.finish_select(fetch_b).unwrap(), SelectionApplied::Applied);
        assert_eq!(controller.finish_select(fetch_a).unwrap(), SelectionApplied::Stale);

        let selection = controller.state().selection().unwrap();
        assert_eq!(selection.detail.as_ref().unwrap().summary.name, "B");
        assert_eq!(selection.analytics.as_ref().unwrap().total_equipment, 2);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_selection_and_skips_reload() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/datasets/3/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/datasets/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([summary_json(3, "Plant C")])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/datasets/3/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut controller = logged_in_controller(&server);
        controller.reload().await.unwrap();
        let _ = controller.select(DatasetId(3)).await;
        controller.dismiss_banner();

        let target = controller.state().find_dataset(DatasetId(3)).cloned().unwrap();
        let deletion = confirm_deletion(&target, preconfirmed).unwrap().unwrap();
        assert!(controller.delete(deletion).await.is_err());

        assert_eq!(controller.state().selected_id(), Some(DatasetId(3)));
        assert_eq!(controller.state().banner().unwrap().message(), "Failed to delete dataset");

        let list_calls = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.method.as_str() == "GET" && r.url.path() == "/api/datasets/")
            .count();
        assert_eq!(list_calls, 1);
    }

    #[tokio::test]
    async fn test_download_toggles_only_its_flag_and_names_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/datasets/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([summary_json(4, "Plant D")])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/datasets/4/download-report/"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4".to_vec()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut controller = logged_in_controller(&server);
        controller.reload().await.unwrap();
        let before = controller.state().datasets().to_vec();

        let destination = dir.path().join(controller.report_name(DatasetId(4), None));
        let outcome = controller
            .download_report(DatasetId(4), Some(destination.clone()))
            .await
            .unwrap();

        assert!(destination.ends_with("report_Plant D.pdf"));
        assert_eq!(outcome, Outcome::ReportSaved { path: destination.clone(), bytes: 8 });
        assert_eq!(std::fs::read(&destination).unwrap(), b"%PDF-1.4");
        assert_eq!(controller.state().datasets(), before.as_slice());
        assert!(!controller.state().busy().any());
    }

    #[tokio::test]
    async fn test_server_file_name_cannot_leave_working_directory() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/datasets/4/download-report/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Disposition", "attachment; filename=\"../x.pdf\"")
                    .set_body_bytes(b"%PDF".to_vec()),
            )
            .mount(&server)
            .await;

        let controller = logged_in_controller(&server);
        assert!(controller.state().datasets().is_empty());

        let report = controller.client().download_report(DatasetId(4)).await.unwrap();
        assert_eq!(report.file_name.as_deref(), Some("../x.pdf"));
        assert_eq!(controller.report_name(DatasetId(4), report.file_name), "x.pdf");

        assert_eq!(
            controller.report_name(DatasetId(4), Some("..\\..\\evil.pdf".to_string())),
            "evil.pdf"
        );
        assert_eq!(controller.report_name(DatasetId(4), Some("../".to_string())), "report_4.pdf");
        assert_eq!(controller.report_name(DatasetId(4), Some("/".to_string())), "report_4.pdf");
    }

    #[tokio::test]
    async fn test_download_failure_raises_banner() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/datasets/4/download-report/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut controller = logged_in_controller(&server);
        let result = controller
            .handle(Intent::DownloadReport {
                id: DatasetId(4),
                destination: Some(dir.path().join("out.pdf")),
            })
            .await;

        assert!(result.is_err());
        assert_eq!(controller.state().banner().unwrap().message(), "Failed to download report");
        assert!(!dir.path().join("out.pdf").exists());
    }

    #[tokio::test]
    async fn test_dismiss_banner_intent() {
        let server = MockServer::start().await;
        let mut controller = logged_in_controller(&server);
        controller.state.show_banner(Operation::ListDatasets);

        let outcome = controller.handle(Intent::DismissBanner).await.unwrap();
        assert_eq!(outcome, Outcome::Done);
        assert!(controller.state().banner().is_none());
    }
}
