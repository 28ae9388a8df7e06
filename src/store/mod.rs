//! Post persistence behind a narrow async trait: PostgreSQL for production, in-memory for tests.

mod memory;
mod postgres;

pub use memory::MemoryPostStore;
pub use postgres::{ensure_database_exists, PgPostStore};

use crate::error::StoreError;
use crate::model::{NewPost, Post, PostPatch};
use async_trait::async_trait;

/// Storage collaborator for posts. Each call is atomic on its own; callers get
/// `Ok(None)` for an id that does not exist.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert and return the stored post with its assigned id.
    async fn create(&self, post: NewPost) -> Result<Post, StoreError>;

    /// All posts in ascending id order.
    async fn list(&self) -> Result<Vec<Post>, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<Post>, StoreError>;

    /// Apply the patch and refresh `updated_at`. Returns the updated post.
    async fn update(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, StoreError>;

    /// Remove the post. Returns the removed post.
    async fn delete(&self, id: i64) -> Result<Option<Post>, StoreError>;

    /// Cheap liveness check backing `GET /ready`.
    async fn ping(&self) -> Result<(), StoreError>;
}
