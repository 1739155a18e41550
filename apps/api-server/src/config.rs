//! Application configuration loaded from environment variables.

use std::env;

use quill_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Only the listen address and the connection string are configurable;
    /// the database and collection names are fixed.
    pub fn from_env() -> Self {
        let database = env::var("MONGODB_URL")
            .map(DatabaseConfig::with_url)
            .unwrap_or_default();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database,
        }
    }
}
