use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Message returned when a write is missing its title or body.
pub const MISSING_FIELDS: &str = "Title and body are required";

/// Store-assigned identifier of a blog post.
///
/// The value is opaque to the domain; the repository that issued it is the
/// only component that knows how to parse it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlogPostId(String);

impl BlogPostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlogPostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BlogPostId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The user-supplied part of a blog post, checked at write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPostContent {
    pub title: String,
    pub body: String,
    pub author: Option<String>,
}

impl BlogPostContent {
    /// Validate the fields of a create or update request.
    ///
    /// Title and body must be present and non-empty. Whitespace is not
    /// trimmed: `" "` is a valid title.
    pub fn new(
        title: Option<String>,
        body: Option<String>,
        author: Option<String>,
    ) -> Result<Self, DomainError> {
        match (non_empty(title), non_empty(body)) {
            (Some(title), Some(body)) => Ok(Self {
                title,
                body,
                author,
            }),
            _ => Err(DomainError::Validation(MISSING_FIELDS.to_string())),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// A blog post that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewBlogPost {
    pub content: BlogPostContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewBlogPost {
    /// Stamp validated content with the creation time.
    pub fn new(content: BlogPostContent) -> Self {
        let now = Utc::now();
        Self {
            content,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Replacement fields for an existing blog post.
#[derive(Debug, Clone)]
pub struct BlogPostChanges {
    pub content: BlogPostContent,
    pub updated_at: DateTime<Utc>,
}

impl BlogPostChanges {
    pub fn new(content: BlogPostContent) -> Self {
        Self {
            content,
            updated_at: Utc::now(),
        }
    }
}

/// BlogPost entity - a persisted blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: String,
    pub body: String,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Materialize a new post under the identifier the store assigned to it.
    pub fn from_new(id: BlogPostId, post: NewBlogPost) -> Self {
        Self {
            id,
            title: post.content.title,
            body: post.content.body,
            author: post.content.author,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }

    /// Replace title, body and author in place. Identifier and creation
    /// time are left untouched.
    pub fn apply(&mut self, changes: BlogPostChanges) {
        self.title = changes.content.title;
        self.body = changes.content.body;
        self.author = changes.content.author;
        self.updated_at = changes.updated_at;
    }
}
