//! BSON mapping of a blog post as it is stored in the collection.

use chrono::{DateTime, Utc};
use mongodb::bson::{self, Document, doc, oid::ObjectId};
use serde::{Deserialize, Serialize};

use quill_core::domain::{BlogPost, BlogPostChanges, BlogPostId, NewBlogPost};
use quill_core::error::RepoError;

/// One document in the `blogs` collection.
///
/// Title and body default to empty strings when a stored document lacks
/// them; records are validated on write only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author: Option<String>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl From<&NewBlogPost> for BlogPostDocument {
    fn from(post: &NewBlogPost) -> Self {
        Self {
            id: None,
            title: post.content.title.clone(),
            body: post.content.body.clone(),
            author: post.content.author.clone(),
            created_at: to_bson_datetime(post.created_at),
            updated_at: to_bson_datetime(post.updated_at),
        }
    }
}

/// Conversion from a stored document to the domain entity.
impl TryFrom<BlogPostDocument> for BlogPost {
    type Error = RepoError;

    fn try_from(document: BlogPostDocument) -> Result<Self, Self::Error> {
        let id = document
            .id
            .ok_or_else(|| RepoError::Query("document has no _id".to_string()))?;

        Ok(Self {
            id: BlogPostId::new(id.to_hex()),
            title: document.title,
            body: document.body,
            author: document.author,
            created_at: to_chrono(document.created_at)?,
            updated_at: to_chrono(document.updated_at)?,
        })
    }
}

/// Parse a path identifier the way the driver does.
pub(crate) fn parse_object_id(id: &BlogPostId) -> Result<ObjectId, RepoError> {
    ObjectId::parse_str(id.as_str()).map_err(|e| RepoError::InvalidId(e.to_string()))
}

/// `$set` update replacing the writable fields of a post.
pub(crate) fn update_document(changes: &BlogPostChanges) -> Document {
    doc! {
        "$set": {
            "title": changes.content.title.as_str(),
            "body": changes.content.body.as_str(),
            "author": changes.content.author.as_deref(),
            "updatedAt": to_bson_datetime(changes.updated_at),
        }
    }
}

fn to_bson_datetime(dt: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(dt.timestamp_millis())
}

fn to_chrono(dt: bson::DateTime) -> Result<DateTime<Utc>, RepoError> {
    DateTime::from_timestamp_millis(dt.timestamp_millis())
        .ok_or_else(|| RepoError::Query(format!("timestamp out of range: {}", dt)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::BlogPostContent;

    fn content(title: &str, body: &str, author: Option<&str>) -> BlogPostContent {
        BlogPostContent::new(
            Some(title.to_string()),
            Some(body.to_string()),
            author.map(str::to_string),
        )
        .unwrap()
    }

    #[test]
    fn test_new_document_has_no_id_and_camel_case_fields() {
        let post = NewBlogPost::new(content("A", "B", Some("ann")));
        let document = BlogPostDocument::from(&post);

        let raw = bson::to_document(&document).unwrap();
        assert!(!raw.contains_key("_id"));
        assert_eq!(raw.get_str("title").unwrap(), "A");
        assert_eq!(raw.get_str("author").unwrap(), "ann");
        assert!(raw.get_datetime("createdAt").is_ok());
        assert!(raw.get_datetime("updatedAt").is_ok());
    }

    #[test]
    fn test_missing_author_is_stored_as_null() {
        let post = NewBlogPost::new(content("A", "B", None));
        let raw = bson::to_document(&BlogPostDocument::from(&post)).unwrap();
        assert!(raw.is_null("author"));
    }

    #[test]
    fn test_document_converts_to_domain_post() {
        let oid = ObjectId::new();
        let now = bson::DateTime::now();
        let document = BlogPostDocument {
            id: Some(oid),
            title: "A".to_string(),
            body: "B".to_string(),
            author: None,
            created_at: now,
            updated_at: now,
        };

        let post = BlogPost::try_from(document).unwrap();
        assert_eq!(post.id.as_str(), oid.to_hex());
        assert_eq!(post.created_at.timestamp_millis(), now.timestamp_millis());
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn test_stored_document_without_body_reads_back_empty() {
        let raw = doc! {
            "_id": ObjectId::new(),
            "title": "only a title",
            "createdAt": bson::DateTime::now(),
            "updatedAt": bson::DateTime::now(),
        };

        let document: BlogPostDocument = bson::from_document(raw).unwrap();
        assert_eq!(document.body, "");
        assert_eq!(document.author, None);
    }

    #[test]
    fn test_document_without_id_is_rejected() {
        let post = NewBlogPost::new(content("A", "B", None));
        let result = BlogPost::try_from(BlogPostDocument::from(&post));
        assert!(matches!(result, Err(RepoError::Query(_))));
    }

    #[test]
    fn test_update_document_sets_writable_fields_only() {
        let changes = BlogPostChanges::new(content("A2", "B2", None));
        let update = update_document(&changes);

        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_str("title").unwrap(), "A2");
        assert_eq!(set.get_str("body").unwrap(), "B2");
        assert!(set.is_null("author"));
        assert!(set.get_datetime("updatedAt").is_ok());
        assert!(!set.contains_key("createdAt"));
        assert!(!set.contains_key("_id"));
    }

    #[test]
    fn test_parse_object_id_rejects_malformed_input() {
        let valid = ObjectId::new();
        assert_eq!(
            parse_object_id(&BlogPostId::new(valid.to_hex())).unwrap(),
            valid
        );
        assert!(matches!(
            parse_object_id(&BlogPostId::new("not-an-id")),
            Err(RepoError::InvalidId(_))
        ));
    }
}
