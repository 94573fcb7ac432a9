//! Service assembly from configuration.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use highlight_config::{Config, ConfigError, ConfigLoader};
use highlight_protocols::store::KeyValueStore;
use highlight_service::{HighlightService, HttpServer};
use highlight_store::{HighlightRepository, JsonFileStore, MemoryStore};
use highlight_summarizer::ChatSummarizer;

/// Build and initialize the service described by `config`.
pub(crate) async fn build_service(
    config: &Config,
) -> Result<Arc<HighlightService>, Box<dyn std::error::Error>> {
    let store: Arc<dyn KeyValueStore> = match config.storage.backend.as_str() {
        "memory" => {
            warn!("Using in-memory storage; highlights will not survive a restart");
            Arc::new(MemoryStore::new())
        }
        "file" => {
            let path = ConfigLoader::storage_path(config)?;
            info!("Storing highlights in {}", path.display());
            Arc::new(JsonFileStore::new(&path).await?)
        }
        other => {
            return Err(ConfigError::InvalidValue {
                field: "storage.backend".to_string(),
                message: format!("unknown backend: {}", other),
            }
            .into())
        }
    };

    let repository = Arc::new(HighlightRepository::new(store));
    let mut service = HighlightService::new(repository);

    match config.summarizer.resolved_api_key() {
        Some(api_key) => {
            let summarizer = ChatSummarizer::with_url(api_key, config.summarizer.api_url.clone())
                .with_model(config.summarizer.model.clone())
                .with_temperature(config.summarizer.temperature)
                .with_max_tokens(config.summarizer.max_tokens)
                .with_timeout(Duration::from_secs(config.summarizer.timeout_seconds))
                .with_max_input_chars(config.summarizer.max_input_chars);
            service = service.with_summarizer(Arc::new(summarizer));
        }
        None => warn!("No summarizer API key configured; summaries are unavailable"),
    }

    service.initialize().await?;
    Ok(Arc::new(service))
}

/// Run the HTTP service in the foreground.
pub(crate) async fn run_server(
    config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Highlight Saver v{}", env!("CARGO_PKG_VERSION"));

    let service = build_service(&config).await?;
    let host = host.unwrap_or(config.server.host);
    let port = port.unwrap_or(config.server.port);

    HttpServer::new(host, port, service).run().await?;
    Ok(())
}
