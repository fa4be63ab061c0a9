//! `equiviz dashboard` command implementation
//!
//! Interactive loop over one [`SessionController`]. Every menu choice becomes
//! an [`Intent`]; the screen is redrawn from controller state after each one.

use crate::commands::with_spinner;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::progress::format_bytes;
use crate::session::{Intent, Outcome, SessionController};
use crate::views::analytics::{self, AnalyticsView, ChartKind};
use crate::views::collection::{self, confirm_deletion, prompt_confirmation};
use crate::views::upload::UploadForm;
use colored::Colorize;
use equiviz_common::types::DatasetSummary;
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use std::fmt;
use tracing::debug;

/// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Select,
    ClearSelection,
    Upload,
    Delete,
    DownloadReport,
    Refresh,
    DismissBanner,
    Logout,
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuItem::Select => "View dataset analytics",
            MenuItem::ClearSelection => "Clear selection",
            MenuItem::Upload => "Upload CSV",
            MenuItem::Delete => "Delete dataset",
            MenuItem::DownloadReport => "Download PDF report",
            MenuItem::Refresh => "Refresh",
            MenuItem::DismissBanner => "Dismiss error",
            MenuItem::Logout => "Logout",
            MenuItem::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// What the menu offers for the current state
fn menu_items(has_datasets: bool, has_selection: bool, has_banner: bool) -> Vec<MenuItem> {
    let mut items = Vec::new();
    if has_datasets {
        items.push(MenuItem::Select);
    }
    if has_selection {
        items.push(MenuItem::DownloadReport);
        items.push(MenuItem::ClearSelection);
    }
    items.push(MenuItem::Upload);
    if has_datasets {
        items.push(MenuItem::Delete);
    }
    items.push(MenuItem::Refresh);
    if has_banner {
        items.push(MenuItem::DismissBanner);
    }
    items.push(MenuItem::Logout);
    items.push(MenuItem::Quit);
    items
}

/// Whether a prompt error means "the user backed out"
fn is_cancel(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Run the dashboard until the user quits
pub async fn run(config: &Config) -> Result<()> {
    let mut controller = SessionController::from_config(config)?;

    if let Err(e) = with_spinner("Loading datasets...", controller.start()).await {
        debug!(error = %e, "Initial load failed; banner shown");
    }

    loop {
        if !controller.state().is_authenticated() && !login_screen(&mut controller).await? {
            return Ok(());
        }

        render(&controller);

        let state = controller.state();
        let items = menu_items(
            !state.datasets().is_empty(),
            state.selection().is_some(),
            state.banner().is_some(),
        );

        let choice = match Select::new("What would you like to do?", items).prompt() {
            Ok(choice) => choice,
            Err(e) if is_cancel(&e) => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        let intent = match choice {
            MenuItem::Quit => return Ok(()),
            MenuItem::Select => match pick_dataset(&controller, "Select a dataset:")? {
                Some(dataset) => Intent::Select(dataset.id),
                None => continue,
            },
            MenuItem::ClearSelection => Intent::ClearSelection,
            MenuItem::Upload => {
                upload_form(&mut controller).await?;
                continue;
            },
            MenuItem::Delete => {
                let Some(dataset) = pick_dataset(&controller, "Delete which dataset?")? else {
                    continue;
                };
                match confirm_deletion(&dataset, prompt_confirmation) {
                    Ok(Some(deletion)) => Intent::Delete(deletion),
                    Ok(None) => continue,
                    Err(CliError::Prompt(_)) => continue,
                    Err(e) => return Err(e),
                }
            },
            MenuItem::DownloadReport => match controller.state().selected_id() {
                Some(id) => Intent::DownloadReport { id, destination: None },
                None => continue,
            },
            MenuItem::Refresh => Intent::Reload,
            MenuItem::DismissBanner => Intent::DismissBanner,
            MenuItem::Logout => Intent::Logout,
        };

        dispatch(&mut controller, intent).await?;
    }
}

/// Hand an intent to the controller and report the outcome
async fn dispatch(controller: &mut SessionController, intent: Intent) -> Result<()> {
    let message = match &intent {
        Intent::Select(_) => "Loading analytics...",
        Intent::Delete(_) => "Deleting...",
        Intent::DownloadReport { .. } => "Downloading report...",
        Intent::Reload => "Loading datasets...",
        _ => "Working...",
    };

    match with_spinner(message, controller.handle(intent)).await {
        Ok(Outcome::ReportSaved { path, bytes }) => {
            println!("{} Saved {} ({})", "✓".green(), path.display(), format_bytes(bytes));
            Ok(())
        },
        Ok(_) => Ok(()),
        // Request failures are shown through the banner on the next redraw
        Err(CliError::Request { .. }) => Ok(()),
        Err(CliError::Io(e)) => {
            println!("{} {}", "✗".red(), e);
            Ok(())
        },
        Err(e) => Err(e),
    }
}

/// Prompt until login succeeds. Returns false if the user backs out.
async fn login_screen(controller: &mut SessionController) -> Result<bool> {
    println!();
    println!("{}", "Chemical Equipment Parameter Visualizer".cyan().bold());
    println!("{}", "Sign in to continue".dimmed());
    println!();

    loop {
        let username = match Text::new("Username:").prompt() {
            Ok(username) => username,
            Err(e) if is_cancel(&e) => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        let password = match Password::new("Password:")
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()
        {
            Ok(password) => password,
            Err(e) if is_cancel(&e) => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        let intent = Intent::Login { username, password };
        match with_spinner("Logging in...", controller.handle(intent)).await {
            Ok(_) => return Ok(true),
            Err(CliError::Auth(message)) => println!("{} {}", "✗".red(), message.red()),
            Err(e) => return Err(e),
        }
    }
}

/// Choose one dataset from the current list
fn pick_dataset(controller: &SessionController, prompt: &str) -> Result<Option<DatasetSummary>> {
    let datasets = controller.state().datasets();
    let labels: Vec<String> = datasets
        .iter()
        .map(|d| format!("{} - {} ({} equipment)", d.id, d.name, d.total_equipment))
        .collect();

    match Select::new(prompt, labels).raw_prompt() {
        Ok(choice) => Ok(datasets.get(choice.index).cloned()),
        Err(e) if is_cancel(&e) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Fill in and submit the upload form; stays open until success or cancel
async fn upload_form(controller: &mut SessionController) -> Result<()> {
    let mut form = UploadForm::new();

    loop {
        let name = match Text::new("Dataset name:").with_initial_value(form.name()).prompt() {
            Ok(name) => name,
            Err(e) if is_cancel(&e) => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        form.set_name(name);

        let default_path = form
            .file()
            .map(|f| f.path.display().to_string())
            .unwrap_or_default();
        let path = match Text::new("CSV file:").with_initial_value(&default_path).prompt() {
            Ok(path) => path,
            Err(e) if is_cancel(&e) => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        if !path.trim().is_empty() && form.pick_file(path.trim()).is_err() {
            print_form_error(&form);
            continue;
        }

        let request = match form.submit() {
            Ok(request) => request,
            Err(_) => {
                print_form_error(&form);
                continue;
            },
        };

        let result = with_spinner("Uploading...", controller.handle(Intent::Upload(request))).await;
        form.complete(&result);

        match result {
            Ok(Outcome::Uploaded(created)) => {
                println!("{} Uploaded {}", "✓".green(), created.name.bold());
                return Ok(());
            },
            Ok(_) => return Ok(()),
            Err(_) => print_form_error(&form),
        }
    }
}

fn print_form_error(form: &UploadForm) {
    if let Some(error) = form.error() {
        println!("{} {}", "✗".red(), error.red());
    }
}

/// Draw banner, list and the selected dataset's analytics
fn render(controller: &SessionController) {
    let state = controller.state();

    println!();
    println!(
        "{}  {}",
        "Chemical Equipment Parameter Visualizer".cyan().bold(),
        state.session().username().unwrap_or_default().dimmed()
    );

    if let Some(banner) = state.banner() {
        println!();
        println!("{} {}", "✗".red(), banner.message().red().bold());
    }

    collection::display_table(state.datasets(), state.selected_id());

    let Some(selection) = state.selection() else {
        return;
    };

    if let Some(name) = selection.name() {
        println!();
        println!("{} {}", "Selected:".bold(), name);
    }

    match AnalyticsView::derive(selection.detail.as_ref(), selection.analytics.as_ref()) {
        Some(view) => analytics::display(&view, ChartKind::All),
        None if state.busy().select => println!("{}", "Loading analytics...".dimmed()),
        None => println!("{}", "No analytics loaded.".dimmed()),
    }
}
