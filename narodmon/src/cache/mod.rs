//! Response caching.
//!
//! The client consults a [`CacheStore`] before every request and stores
//! successful response bodies for [`RESPONSE_TTL`]. Error responses are never
//! cached and cached bodies are never re-classified.
//!
//! # Available Stores
//!
//! - [`NullCache`]: never hits, discards writes (the default)
//! - [`MemoryCache`]: in-memory store backed by moka
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use narodmon::cache::MemoryCache;
//! use narodmon::NarodmonClient;
//!
//! let client = NarodmonClient::new("device-id", "api-key")?
//!     .with_cache(Arc::new(MemoryCache::default()));
//! # Ok::<(), narodmon::ApiError>(())
//! ```

mod key;
mod memory;
mod null;
mod traits;

use std::time::Duration;

pub use key::{cache_key, canonicalize, KEY_PREFIX};
pub use memory::{MemoryCache, DEFAULT_MAX_SIZE_BYTES};
pub use null::NullCache;
pub use traits::{CacheError, CacheStore};

/// Time-to-live of cached responses.
pub const RESPONSE_TTL: Duration = Duration::from_secs(300);
