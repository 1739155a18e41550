use async_trait::async_trait;

use crate::domain::{BlogPost, BlogPostChanges, BlogPostId, NewBlogPost};
use crate::error::RepoError;

/// Blog post repository - the single collection this service manages.
///
/// Every method maps onto exactly one store operation. Identifier parsing is
/// left to the implementation; an identifier it cannot parse is reported as
/// [`RepoError::InvalidId`].
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// Persist a new post and return it with its store-assigned identifier.
    async fn insert(&self, post: NewBlogPost) -> Result<BlogPost, RepoError>;

    /// Every post in the collection, in the store's natural order.
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError>;

    /// Find a post by its identifier.
    async fn find_by_id(&self, id: &BlogPostId) -> Result<Option<BlogPost>, RepoError>;

    /// Replace title, body and author and refresh the update time.
    /// Returns [`RepoError::NotFound`] if no post matched.
    async fn update(&self, id: &BlogPostId, changes: BlogPostChanges) -> Result<(), RepoError>;

    /// Remove a post. Returns [`RepoError::NotFound`] if no post matched.
    async fn delete(&self, id: &BlogPostId) -> Result<(), RepoError>;
}
