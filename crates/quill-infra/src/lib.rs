//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `mongodb` (default) - MongoDB-backed blog post repository
//! - `minimal` - No external dependencies, in-memory only

pub mod database;

pub use database::{DatabaseConfig, InMemoryBlogPostRepository};

#[cfg(feature = "mongodb")]
pub use database::{DatabaseConnections, MongoBlogPostRepository};
