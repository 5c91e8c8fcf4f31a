//! Cache store that never stores anything.

use std::time::Duration;

use crate::cache::traits::{CacheError, CacheStore};

/// Null-object cache: every lookup misses and every write is discarded.
///
/// This is the client's default, which makes caching strictly opt-in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCache;

impl CacheStore for NullCache {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_cache_never_hits() {
        let cache = NullCache;

        cache
            .set("key", vec![1, 2, 3], Duration::from_secs(300))
            .unwrap();
        assert!(cache.get("key").unwrap().is_none());
    }
}
