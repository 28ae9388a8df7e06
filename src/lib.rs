//! Posts API: CRUD REST backend for a single `posts` resource.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod logger;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use app::{build_router, connect_store, serve};
pub use config::{load_env_files, AppConfig, StorageBackend, DEFAULT_LOG_FILE};
pub use error::{AppError, ConfigError, StoreError};
pub use logger::{FileLogger, LogLevel, Logger, MemoryLogger};
pub use migration::apply_migrations;
pub use model::{NewPost, Post, PostPatch};
pub use routes::{common_routes_with_ready, post_routes};
pub use service::PostService;
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryPostStore, PgPostStore, PostStore};
