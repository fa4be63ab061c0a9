//! Equiviz CLI - Main entry point

use clap::Parser;
use equiviz_cli::commands;
use equiviz_cli::{Cli, Commands, Config, ConfigCommand};
use equiviz_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    if cli.command.is_none() {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    }

    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .log_file_prefix("equiviz".to_string())
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging
    let _ = init_logging(&log_config);

    if let Err(e) = execute_command(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> equiviz_cli::Result<()> {
    let Some(ref command) = cli.command else {
        return Ok(());
    };

    let mut config = Config::from_env()?.with_overrides(cli.server_url.clone(), cli.state_dir.clone())?;
    config.set_verbose(cli.verbose);

    match command {
        Commands::Login { username, password } => {
            commands::login::run(&config, username.clone(), password.clone()).await
        },
        Commands::Logout => commands::logout::run(&config).await,
        Commands::Status => commands::status::run(&config).await,
        Commands::Datasets { format } => commands::datasets::run(&config, format).await,
        Commands::Show { id, chart, records } => commands::show::run(&config, id, chart, *records).await,
        Commands::Records { id } => commands::records::run(&config, id).await,
        Commands::Upload { file, name } => commands::upload::run(&config, file, name).await,
        Commands::Delete { id, yes } => commands::delete::run(&config, id, *yes).await,
        Commands::Report { id, output } => commands::report::run(&config, id, output.clone()).await,
        Commands::Dashboard => commands::dashboard::run(&config).await,
        Commands::Config { command } => match command {
            ConfigCommand::Get { key } => commands::config::get(&config, key),
            ConfigCommand::Show => commands::config::show(&config),
        },
    }
}
