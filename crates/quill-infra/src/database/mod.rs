//! Database connection management and repository implementations.

mod connections;
mod memory_repo;

#[cfg(feature = "mongodb")]
mod document;
#[cfg(feature = "mongodb")]
mod mongo_repo;

pub use connections::DatabaseConfig;
pub use memory_repo::InMemoryBlogPostRepository;

#[cfg(feature = "mongodb")]
pub use connections::DatabaseConnections;
#[cfg(feature = "mongodb")]
pub use document::BlogPostDocument;
#[cfg(feature = "mongodb")]
pub use mongo_repo::MongoBlogPostRepository;

#[cfg(feature = "mongodb")]
#[cfg(test)]
mod tests;
