//! Application host: storage selection, router assembly, and serving.

use crate::config::{AppConfig, StorageBackend};
use crate::error::AppError;
use crate::logger::Logger;
use crate::migration::apply_migrations;
use crate::routes::{common_routes_with_ready, post_routes};
use crate::state::AppState;
use crate::store::{ensure_database_exists, MemoryPostStore, PgPostStore, PostStore};
use axum::{extract::DefaultBodyLimit, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Full router: common routes plus post CRUD, with request tracing and a body size limit.
/// The limit is enforced by the body extractors, so oversized requests get the JSON error body.
pub fn build_router(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(post_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit_bytes)),
        )
}

/// Open the configured store. For postgres: create the database if missing, connect, migrate.
pub async fn connect_store(config: &AppConfig) -> Result<Arc<dyn PostStore>, AppError> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; posts are lost on restart");
            Ok(Arc::new(MemoryPostStore::new()))
        }
        StorageBackend::Postgres => {
            let database_url = config.require_database_url()?;
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await
                .map_err(crate::error::StoreError::from)?;
            apply_migrations(&pool).await?;
            Ok(Arc::new(PgPostStore::new(pool)))
        }
    }
}

/// Bind and serve until ctrl-c.
pub async fn serve(config: &AppConfig, state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let logger: Arc<dyn Logger> = state.logger.clone();
    let app = build_router(state, config.body_limit_bytes);
    let listener = TcpListener::bind(config.bind_addr()).await?;
    let addr = listener.local_addr()?;
    tracing::info!("listening on {}", addr);
    logger.info(&format!("listening on {}", addr));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    logger.info("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
