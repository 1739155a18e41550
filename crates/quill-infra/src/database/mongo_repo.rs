//! MongoDB repository implementation.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{Collection, bson::doc, error::Error as MongoError, error::ErrorKind};

use quill_core::domain::{BlogPost, BlogPostChanges, BlogPostId, NewBlogPost};
use quill_core::error::RepoError;
use quill_core::ports::BlogPostRepository;

use super::document::{BlogPostDocument, parse_object_id, update_document};

/// Blog post repository backed by a single MongoDB collection.
#[derive(Clone)]
pub struct MongoBlogPostRepository {
    collection: Collection<BlogPostDocument>,
}

impl MongoBlogPostRepository {
    pub fn new(collection: Collection<BlogPostDocument>) -> Self {
        Self { collection }
    }
}

/// Network and server-selection failures are connection problems; anything
/// else is reported as a failed query.
pub(crate) fn repo_error(err: MongoError) -> RepoError {
    match *err.kind {
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) | ErrorKind::DnsResolve { .. } => {
            RepoError::Connection(err.to_string())
        }
        _ => RepoError::Query(err.to_string()),
    }
}

#[async_trait]
impl BlogPostRepository for MongoBlogPostRepository {
    async fn insert(&self, post: NewBlogPost) -> Result<BlogPost, RepoError> {
        let mut document = BlogPostDocument::from(&post);
        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(repo_error)?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| RepoError::Query("inserted _id is not an ObjectId".to_string()))?;
        tracing::debug!(blog_id = %id, "Inserted blog post");

        document.id = Some(id);
        BlogPost::try_from(document)
    }

    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let documents: Vec<BlogPostDocument> = self
            .collection
            .find(doc! {})
            .await
            .map_err(repo_error)?
            .try_collect()
            .await
            .map_err(repo_error)?;

        documents.into_iter().map(BlogPost::try_from).collect()
    }

    async fn find_by_id(&self, id: &BlogPostId) -> Result<Option<BlogPost>, RepoError> {
        let oid = parse_object_id(id)?;
        let result = self
            .collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(repo_error)?;

        result.map(BlogPost::try_from).transpose()
    }

    async fn update(&self, id: &BlogPostId, changes: BlogPostChanges) -> Result<(), RepoError> {
        let oid = parse_object_id(id)?;
        let result = self
            .collection
            .update_one(doc! { "_id": oid }, update_document(&changes))
            .await
            .map_err(repo_error)?;

        if result.matched_count == 0 {
            return Err(RepoError::NotFound);
        }

        tracing::debug!(blog_id = %oid, modified = result.modified_count, "Updated blog post");
        Ok(())
    }

    async fn delete(&self, id: &BlogPostId) -> Result<(), RepoError> {
        let oid = parse_object_id(id)?;
        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(repo_error)?;

        if result.deleted_count == 0 {
            return Err(RepoError::NotFound);
        }

        tracing::debug!(blog_id = %oid, "Deleted blog post");
        Ok(())
    }
}
