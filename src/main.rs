//! Highlight Saver
//!
//! Entry point for the Highlight Saver CLI and service.

mod cli;
mod commands;
mod console;
mod server;

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use highlight_config::{Config, ConfigError, ConfigLoader, ConfigValidator};
use highlight_protocols::client::ServiceClient;
use highlight_service::{HttpClient, LocalClient};

use crate::cli::{Cli, Commands};

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.highlight-saver/logs/ with daily rotation.
fn init_tracing(default_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = ConfigLoader::app_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("highlight-saver")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Dropping the guard stops the file writer.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Load the configuration file and reject invalid settings.
fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => ConfigLoader::default_path()?,
    };
    let config = ConfigLoader::load_or_default(&path)?;

    let result = ConfigValidator::validate(&config);
    for warning in &result.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    if let Some(error) = result.errors.first() {
        return Err(ConfigError::InvalidValue {
            field: error.path.clone(),
            message: error.message.clone(),
        }
        .into());
    }

    info!("Configuration loaded from {}", path.display());
    Ok(config)
}

/// Pick the transport: a running service if one was named, the store directly otherwise.
async fn connect(
    cli: &Cli,
    config: &Config,
) -> Result<Arc<dyn ServiceClient>, Box<dyn std::error::Error>> {
    match &cli.server {
        Some(url) => Ok(Arc::new(HttpClient::new(url.clone()))),
        None => {
            let service = server::build_service(config).await?;
            Ok(Arc::new(LocalClient::new(service)))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    };
    init_tracing(default_level)?;

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Serve { ref host, port } => {
            server::run_server(config, host.clone(), port).await
        }
        Commands::List => commands::list(connect(&cli, &config).await?, &config).await,
        Commands::Save {
            ref text,
            ref url,
            ref title,
        } => {
            let client = connect(&cli, &config).await?;
            commands::save(client, &config, text.clone(), url.clone(), title.clone()).await
        }
        Commands::Delete { ref id } => {
            commands::delete(connect(&cli, &config).await?, &config, id).await
        }
        Commands::Clear { yes } => {
            commands::clear(connect(&cli, &config).await?, &config, yes).await
        }
        Commands::Source { ref id } => {
            commands::source(connect(&cli, &config).await?, &config, id).await
        }
        Commands::Summarize => commands::summarize(connect(&cli, &config).await?, &config).await,
    }
}
