use std::time::Duration;

#[cfg(feature = "mongodb")]
use mongodb::{Client, Collection, bson::doc, error::Error as MongoError, options::ClientOptions};

#[cfg(feature = "mongodb")]
use super::document::BlogPostDocument;

/// Connection string used when none is configured.
pub const DEFAULT_MONGODB_URL: &str = "mongodb://localhost:27017";
/// Database holding the blog collection.
pub const DATABASE_NAME: &str = "blogApp";
/// Collection holding one document per blog post.
pub const COLLECTION_NAME: &str = "blogs";

/// Configuration for the document store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub database: String,
    pub collection: String,
    pub connect_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_MONGODB_URL.to_string(),
            database: DATABASE_NAME.to_string(),
            collection: COLLECTION_NAME.to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl DatabaseConfig {
    /// Default configuration pointed at another server.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Handle to the document store, created once at startup.
///
/// The driver pools connections internally and reconnects on its own; the
/// handle is cheap to clone and is never mutated after `init`.
#[cfg(feature = "mongodb")]
#[derive(Clone)]
pub struct DatabaseConnections {
    client: Client,
    config: DatabaseConfig,
}

#[cfg(feature = "mongodb")]
impl DatabaseConnections {
    /// Build the client and check in the background that the server answers.
    ///
    /// Only a malformed connection string is an error. An unreachable server
    /// is logged and startup continues, so requests fail individually until
    /// the store comes back.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, MongoError> {
        tracing::info!("Initializing database connection...");

        let mut options = ClientOptions::parse(config.url.as_str()).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(config.connect_timeout);

        let client = Client::with_options(options)?;
        let connections = Self {
            client,
            config: config.clone(),
        };

        let probe = connections.clone();
        tokio::spawn(async move {
            match probe.ping().await {
                Ok(()) => tracing::info!(
                    database = %probe.config.database,
                    collection = %probe.config.collection,
                    "Connected to MongoDB"
                ),
                Err(e) => tracing::error!("Error connecting to MongoDB: {}", e),
            }
        });

        Ok(connections)
    }

    /// Round-trip a `ping` command to the server.
    pub async fn ping(&self) -> Result<(), MongoError> {
        self.client
            .database(&self.config.database)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    /// The blog post collection.
    pub fn blogs(&self) -> Collection<BlogPostDocument> {
        self.client
            .database(&self.config.database)
            .collection(&self.config.collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_local_blog_collection() {
        let config = DatabaseConfig::default();
        assert_eq!(config.url, "mongodb://localhost:27017");
        assert_eq!(config.database, "blogApp");
        assert_eq!(config.collection, "blogs");
    }

    #[test]
    fn test_with_url_keeps_fixed_names() {
        let config = DatabaseConfig::with_url("mongodb://db:27017");
        assert_eq!(config.url, "mongodb://db:27017");
        assert_eq!(config.database, DATABASE_NAME);
        assert_eq!(config.collection, COLLECTION_NAME);
    }
}
