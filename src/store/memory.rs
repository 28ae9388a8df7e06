use super::PostStore;
use crate::error::StoreError;
use crate::model::{NewPost, Post, PostPatch};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// In-process store. Ids come from a counter that only grows, so a deleted id is never reissued.
#[derive(Default)]
pub struct MemoryPostStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    posts: BTreeMap<i64, Post>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn create(&self, post: NewPost) -> Result<Post, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let now = Utc::now();
        let stored = Post {
            id: inner.last_id,
            title: post.title,
            content: post.content,
            created_at: now,
            updated_at: now,
        };
        inner.posts.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.inner.read().await.posts.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Post>, StoreError> {
        Ok(self.inner.read().await.posts.get(&id).cloned())
    }

    async fn update(&self, id: i64, patch: PostPatch) -> Result<Option<Post>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(post) = inner.posts.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply_to(post);
        post.updated_at = Utc::now();
        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: i64) -> Result<Option<Post>, StoreError> {
        Ok(self.inner.write().await.posts.remove(&id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
