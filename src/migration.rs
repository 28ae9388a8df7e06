//! Schema setup for the posts table. Idempotent; run at startup before serving.

use crate::error::StoreError;
use sqlx::PgPool;

const CREATE_POSTS: &str = r#"
    CREATE TABLE IF NOT EXISTS posts (
        id BIGSERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

pub async fn apply_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(CREATE_POSTS).execute(pool).await?;
    tracing::info!("posts table ready");
    Ok(())
}
