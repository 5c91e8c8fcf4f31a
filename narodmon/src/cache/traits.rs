//! Core trait for response caching.
//!
//! The `CacheStore` trait provides a minimal key-value interface with
//! per-entry time-to-live. The client keys entries by a hash of the request
//! envelope and stores raw response bodies.
//!
//! # Design Principles
//!
//! - **String keys**: Human-readable prefix plus a hex digest
//! - **Vec<u8> values**: Raw bytes, no serialization opinions imposed
//! - **Minimal interface**: `get` and `set`, nothing else
//! - **Self-contained expiry**: Stores drop entries once their TTL elapses
//! - **Dyn-compatible**: Stored as `Arc<dyn CacheStore>` by the client

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur inside a cache store.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O error in a persistent backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific error.
    #[error("Cache backend error: {0}")]
    Backend(String),
}

/// Key-value store for successful API responses.
///
/// # Thread Safety
///
/// The client does not serialize access to its cache. Implementations must
/// be `Send + Sync` and safe under concurrent `get`/`set` calls.
pub trait CacheStore: Send + Sync {
    /// Retrieve a value by key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(data))` if the key exists and has not expired
    /// - `Ok(None)` if the key is not found
    /// - `Err(_)` if the backend fails
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store a value that expires after `ttl`.
    ///
    /// If the key already exists, the value and its TTL are replaced.
    fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;
}
