//! Load [`AppConfig`] from `.env` files and process environment.

use crate::config::types::*;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Load `.env.<APP_ENV>` (if `APP_ENV` is set) and then `.env` from the working directory.
/// Runs before logging is set up, so it returns the files it loaded instead of logging them.
pub fn load_env_files() -> Vec<PathBuf> {
    let app_env = std::env::var("APP_ENV").ok();
    load_env_files_from(Path::new("."), app_env.as_deref())
}

/// Variables already present in the environment are never overwritten, so earlier
/// sources win. Missing files are skipped.
pub fn load_env_files_from(dir: &Path, app_env: Option<&str>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(env) = app_env.map(str::trim).filter(|e| !e.is_empty()) {
        candidates.push(dir.join(format!(".env.{}", env)));
    }
    candidates.push(dir.join(".env"));
    candidates
        .into_iter()
        .filter(|path| dotenvy::from_path(path).is_ok())
        .collect()
}

impl AppConfig {
    /// Build config from the process environment. Call [`load_env_files`] first.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = AppConfig::default();

        let database_url = get("DATABASE_URL");
        let storage = match get("STORAGE") {
            Some(s) => StorageBackend::from_str(&s)?,
            None if database_url.is_some() => StorageBackend::Postgres,
            None => StorageBackend::Memory,
        };

        let config = AppConfig {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            storage,
            database_url,
            max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                get("DATABASE_MAX_CONNECTIONS"),
                defaults.max_connections,
            )?,
            log_file: get("LOG_FILE").map(PathBuf::from).unwrap_or(defaults.log_file),
            body_limit_bytes: parse_or(
                "BODY_LIMIT_BYTES",
                get("BODY_LIMIT_BYTES"),
                defaults.body_limit_bytes,
            )?,
        };
        if config.storage == StorageBackend::Postgres {
            config.require_database_url()?;
        }
        Ok(config)
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
