//! In-memory blog post repository - used when MongoDB support is compiled out,
//! and as a test double for the HTTP layer.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use quill_core::domain::{BlogPost, BlogPostChanges, BlogPostId, NewBlogPost};
use quill_core::error::RepoError;
use quill_core::ports::BlogPostRepository;

/// Blog post repository using a `BTreeMap` behind an async `RwLock`.
///
/// Identifiers mimic MongoDB ObjectIds: 24 hex characters made of a seconds
/// timestamp and a counter, so key order is insertion order. Identifiers of
/// any other shape are rejected as malformed.
///
/// Note: Data is lost on process restart.
pub struct InMemoryBlogPostRepository {
    store: RwLock<BTreeMap<BlogPostId, BlogPost>>,
    counter: AtomicU64,
}

impl InMemoryBlogPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(BTreeMap::new()),
            counter: AtomicU64::new(0),
        }
    }

    fn next_id(&self) -> BlogPostId {
        let seconds = Utc::now().timestamp() as u32;
        let count = self.counter.fetch_add(1, Ordering::Relaxed);
        BlogPostId::new(format!("{:08x}{:016x}", seconds, count))
    }

    /// Validate an identifier and fold it to the lowercase form used as key.
    fn normalize_id(id: &BlogPostId) -> Result<BlogPostId, RepoError> {
        let raw = id.as_str();
        if raw.len() == 24 && raw.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(BlogPostId::new(raw.to_ascii_lowercase()))
        } else {
            Err(RepoError::InvalidId(format!(
                "expected 24 hex characters, got {:?}",
                raw
            )))
        }
    }
}

impl Default for InMemoryBlogPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlogPostRepository for InMemoryBlogPostRepository {
    async fn insert(&self, post: NewBlogPost) -> Result<BlogPost, RepoError> {
        let post = BlogPost::from_new(self.next_id(), post);
        let mut store = self.store.write().await;
        store.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &BlogPostId) -> Result<Option<BlogPost>, RepoError> {
        let id = Self::normalize_id(id)?;
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn update(&self, id: &BlogPostId, changes: BlogPostChanges) -> Result<(), RepoError> {
        let id = Self::normalize_id(id)?;
        let mut store = self.store.write().await;
        let post = store.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.apply(changes);
        Ok(())
    }

    async fn delete(&self, id: &BlogPostId) -> Result<(), RepoError> {
        let id = Self::normalize_id(id)?;
        let mut store = self.store.write().await;
        store.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}
