//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::BlogPostRepository;
use quill_infra::DatabaseConfig;

#[cfg(all(feature = "mongodb", not(feature = "minimal")))]
use quill_infra::{DatabaseConnections, MongoBlogPostRepository};

#[cfg(any(feature = "minimal", not(feature = "mongodb")))]
use quill_infra::InMemoryBlogPostRepository;

/// Shared application state, built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn BlogPostRepository>,
}

impl AppState {
    /// Wrap an already constructed repository.
    pub fn with_repository(posts: Arc<dyn BlogPostRepository>) -> Self {
        Self { posts }
    }

    /// Build the application state against the configured document store.
    #[cfg(all(feature = "mongodb", not(feature = "minimal")))]
    pub async fn new(db_config: &DatabaseConfig) -> anyhow::Result<Self> {
        let connections = DatabaseConnections::init(db_config).await?;
        let posts = Arc::new(MongoBlogPostRepository::new(connections.blogs()));

        tracing::info!("Application state initialized");
        Ok(Self::with_repository(posts))
    }

    /// Build the application state with the in-memory repository.
    #[cfg(any(feature = "minimal", not(feature = "mongodb")))]
    pub async fn new(_db_config: &DatabaseConfig) -> anyhow::Result<Self> {
        tracing::info!("Minimal build - using in-memory repository");
        Ok(Self::with_repository(Arc::new(
            InMemoryBlogPostRepository::new(),
        )))
    }
}
