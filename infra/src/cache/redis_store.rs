//! Redis-backed key-value store
//!
//! Stores OTP, throttle and session records as plain string values over a
//! multiplexed async connection. Keys are namespaced with the configured
//! prefix so several deployments can share one Redis database.

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use zm_core::errors::StoreError;
use zm_core::services::KeyValueStoreTrait;
use zm_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Key-value store over a Redis connection
#[derive(Clone)]
pub struct RedisStore {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this store
    config: CacheConfig,
}

impl RedisStore {
    /// Connect with the default retry policy (3 attempts, 100ms base delay)
    ///
    /// # Example
    /// ```no_run
    /// use zm_infra::cache::{CacheConfig, RedisStore};
    ///
    /// async fn connect() -> Result<RedisStore, zm_infra::InfrastructureError> {
    ///     let config = CacheConfig::new("redis://localhost:6379").with_prefix("zenithmind");
    ///     RedisStore::connect(config).await
    /// }
    /// ```
    pub async fn connect(config: CacheConfig) -> Result<Self, InfrastructureError> {
        Self::connect_with_retry(config, 3, 100).await
    }

    /// Connect, retrying with exponential backoff capped at 5 seconds
    pub async fn connect_with_retry(
        config: CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!(
            url = %mask_url(&config.url),
            database = config.database,
            "Creating Redis store"
        );

        let client = Client::open(connection_url(&config)).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let mut attempts = 0;
        let mut delay = retry_delay_ms;
        let connection = loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let result = match tokio::time::timeout(
                Duration::from_secs(config.connection_timeout),
                client.get_multiplexed_async_connection(),
            )
            .await
            {
                Ok(result) => result.map_err(InfrastructureError::Cache),
                Err(_) => Err(InfrastructureError::General(format!(
                    "Redis connection timed out after {}s",
                    config.connection_timeout
                ))),
            };

            match result {
                Ok(connection) => break connection,
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        };

        info!("Redis store connected");
        Ok(Self { connection, config })
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Check the connection with `PING`
    pub async fn health_check(&self) -> Result<(), InfrastructureError> {
        let mut conn = self.connection.clone();
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStoreTrait for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection.clone();
        conn.get::<_, Option<String>>(self.config.make_key(key))
            .await
            .map_err(|e| store_error("GET", key, e))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        conn.set::<_, _, ()>(self.config.make_key(key), value)
            .await
            .map_err(|e| store_error("SET", key, e))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection.clone();
        conn.del::<_, ()>(self.config.make_key(key))
            .await
            .map_err(|e| store_error("DEL", key, e))
    }
}

fn store_error(command: &str, key: &str, error: redis::RedisError) -> StoreError {
    error!(command, key, error = %error, "Redis command failed");
    InfrastructureError::Cache(error).into()
}

/// Apply the configured database number to the URL unless it names one
fn connection_url(config: &CacheConfig) -> String {
    let url = config.url.trim_end_matches('/');
    let has_database = url
        .rsplit_once('/')
        .map(|(head, tail)| !head.ends_with('/') && tail.parse::<u8>().is_ok())
        .unwrap_or(false);

    if has_database || config.database == 0 {
        url.to_string()
    } else {
        format!("{}/{}", url, config.database)
    }
}

/// Mask sensitive information in Redis URL for logging
fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}
