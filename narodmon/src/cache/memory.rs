//! In-memory cache store using moka.
//!
//! This store wraps `moka::sync::Cache`, which is safe to share across
//! threads without external locking and evicts least-recently-used entries
//! once the configured byte budget is exceeded.
//!
//! # Expiry
//!
//! Each entry carries its own TTL (the `ttl` passed to `set`). Moka's
//! per-entry expiration drops the entry once it elapses; replacing an entry
//! restarts its TTL.

use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::sync::Cache as MokaCache;
use moka::Expiry;

use crate::cache::traits::{CacheError, CacheStore};

/// Default memory budget: 16 MiB of response bodies.
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Clone)]
struct CachedBody {
    body: Arc<Vec<u8>>,
    ttl: Duration,
}

/// Expiry policy reading the TTL stored alongside each body.
struct PerEntryTtl;

impl Expiry<String, CachedBody> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedBody,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedBody,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-memory response cache.
///
/// Cloning is cheap and clones share the same underlying storage, so one
/// `MemoryCache` can back several clients.
#[derive(Clone)]
pub struct MemoryCache {
    cache: MokaCache<String, CachedBody>,
    max_size_bytes: u64,
}

impl MemoryCache {
    /// Create a new memory cache.
    ///
    /// # Arguments
    ///
    /// * `max_size_bytes` - Maximum total size of cached bodies in bytes
    pub fn new(max_size_bytes: u64) -> Self {
        let cache = MokaCache::builder()
            // Weight each entry by its body size
            .weigher(|_key: &String, value: &CachedBody| -> u32 {
                // moka uses u32 for weights, cap at u32::MAX for very large entries
                value.body.len().min(u32::MAX as usize) as u32
            })
            .max_capacity(max_size_bytes)
            .expire_after(PerEntryTtl)
            .build();

        Self {
            cache,
            max_size_bytes,
        }
    }

    /// Maximum configured size in bytes.
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }

    /// Number of live entries.
    ///
    /// Moka applies writes and expirations lazily; pending maintenance is run
    /// first so the count reflects every completed `set`.
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE_BYTES)
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.cache.get(key).map(|entry| (*entry.body).clone()))
    }

    fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        self.cache.insert(
            key.to_string(),
            CachedBody {
                body: Arc::new(value),
                ttl,
            },
        );
        Ok(())
    }
}
