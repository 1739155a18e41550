//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Body of a create or update request.
///
/// Every field is optional at the wire level so that a missing title or body
/// is reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogPostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// A stored blog post as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub body: String,
    pub author: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
