//! Server binary: loads config from env, opens storage, serves the posts API.

use posts_api::{
    connect_store, load_env_files, serve, AppConfig, AppState, FileLogger, Logger,
    DEFAULT_LOG_FILE,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Env files may carry RUST_LOG, so they are read before the subscriber is built.
    let env_files = load_env_files();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("posts_api=info,tower_http=info")),
        )
        .init();
    for file in &env_files {
        tracing::debug!(file = %file.display(), "loaded env file");
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            let path = std::env::var("LOG_FILE")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILE.into());
            if let Ok(logger) = FileLogger::open(&path) {
                logger.error("invalid configuration", Some(&e.to_string()));
            }
            return Err(e.into());
        }
    };

    let logger: Arc<dyn Logger> = Arc::new(FileLogger::open(&config.log_file)?);
    let store = match connect_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            logger.error("failed to open storage", Some(&e.to_string()));
            return Err(e.into());
        }
    };
    tracing::info!(
        storage = ?config.storage,
        log_file = %config.log_file.display(),
        "starting"
    );

    let state = AppState::new(store, logger);
    serve(&config, state).await
}
