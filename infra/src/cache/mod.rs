//! Cache module for key-value storage
//!
//! This module provides the stores behind `KeyValueStoreTrait`: an
//! in-process map for local use and tests, and a Redis-backed store for
//! server deployments.

pub mod memory_store;
#[cfg(feature = "redis-cache")]
pub mod redis_store;


pub use memory_store::InMemoryStore;
#[cfg(feature = "redis-cache")]
pub use redis_store::RedisStore;

// Re-export commonly used types
pub use zm_shared::config::CacheConfig;
