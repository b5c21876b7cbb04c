//! Key-value store configuration module

use serde::{Deserialize, Serialize};

/// Redis connection configuration for the server-side key-value store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Prefix applied to every key
    #[serde(default)]
    pub key_prefix: Option<String>,

    /// Redis database number (0-15)
    #[serde(default)]
    pub database: u8,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: default_connection_timeout(),
            key_prefix: None,
            database: 0,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_env_with(Self::default())
    }

    /// Override `base` with any `REDIS_*` variables that are set
    pub fn from_env_with(base: Self) -> Self {
        let url = std::env::var("REDIS_URL").unwrap_or(base.url);
        let key_prefix = std::env::var("REDIS_KEY_PREFIX").ok().or(base.key_prefix);
        let database = std::env::var("REDIS_DATABASE")
            .ok()
            .and_then(|db| db.parse::<u8>().ok())
            .map(|db| db.min(15))
            .unwrap_or(base.database);

        Self {
            url,
            key_prefix,
            database,
            ..base
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Set the database number
    pub fn with_database(mut self, db: u8) -> Self {
        self.database = db.min(15);
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn default_connection_timeout() -> u64 {
    5
}
