//! PostService: the post lifecycle over a [`PostStore`], with event logging.
//!
//! A post moves `NonExistent -> Existing` on create, loops on update, and returns to
//! `NonExistent` on delete for good: the store never reissues an id.

use crate::error::{AppError, StoreError};
use crate::logger::Logger;
use crate::model::{NewPost, Post, PostPatch};
use crate::store::PostStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
    logger: Arc<dyn Logger>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>, logger: Arc<dyn Logger>) -> Self {
        PostService { store, logger }
    }

    pub async fn create(&self, input: NewPost) -> Result<Post, AppError> {
        let post = self
            .store
            .create(input)
            .await
            .map_err(|e| self.storage_failure("create post", e))?;
        self.logger.info(&format!("post {} created", post.id));
        Ok(post)
    }

    pub async fn list(&self) -> Result<Vec<Post>, AppError> {
        self.store
            .list()
            .await
            .map_err(|e| self.storage_failure("list posts", e))
    }

    pub async fn read(&self, id: i64) -> Result<Post, AppError> {
        self.store
            .get(id)
            .await
            .map_err(|e| self.storage_failure("read post", e))?
            .ok_or_else(|| self.not_found("read", id))
    }

    pub async fn update(&self, id: i64, patch: PostPatch) -> Result<Post, AppError> {
        let post = self
            .store
            .update(id, patch)
            .await
            .map_err(|e| self.storage_failure("update post", e))?
            .ok_or_else(|| self.not_found("update", id))?;
        self.logger.info(&format!("post {} updated", post.id));
        Ok(post)
    }

    /// Returns the removed post as the acknowledgment.
    pub async fn delete(&self, id: i64) -> Result<Post, AppError> {
        let post = self
            .store
            .delete(id)
            .await
            .map_err(|e| self.storage_failure("delete post", e))?
            .ok_or_else(|| self.not_found("delete", id))?;
        self.logger.info(&format!("post {} deleted", post.id));
        Ok(post)
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }

    fn not_found(&self, op: &str, id: i64) -> AppError {
        self.logger.warn(&format!("{}: post {} not found", op, id));
        AppError::NotFound(format!("post {}", id))
    }

    fn storage_failure(&self, op: &str, e: StoreError) -> AppError {
        tracing::error!(error = %e, "{} failed", op);
        self.logger.error(&format!("{} failed", op), Some(&e.to_string()));
        AppError::Storage(e)
    }
}
