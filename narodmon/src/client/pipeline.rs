//! Request pipeline: envelope, cache, transport, classification.
//!
//! ```text
//! command + params ──► envelope ──► cache key ──► cache hit? ──► value
//!                                                    │ miss
//!                                                    ▼
//!                        cache.set ◄── success ◄── decode ◄── POST
//!                                                    │ errno
//!                                                    ▼
//!                                               RemoteError
//! ```

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::cache::{cache_key, CacheStore, NullCache, RESPONSE_TTL};
use crate::error::{ApiResult, RemoteError, TransportError};
use crate::identity::SessionIdentity;
use crate::transport::{Transport, TransportResponse};

/// Executes commands against the API endpoint.
///
/// Holds no mutable state of its own; concurrent calls only share the cache,
/// which is responsible for its own synchronization.
pub struct RequestPipeline<T: Transport> {
    transport: T,
    cache: Arc<dyn CacheStore>,
    identity: SessionIdentity,
    endpoint: String,
}

impl<T: Transport> RequestPipeline<T> {
    /// Creates a pipeline with the null cache.
    pub fn new(transport: T, identity: SessionIdentity, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            cache: Arc::new(NullCache),
            identity,
            endpoint: endpoint.into(),
        }
    }

    /// Replaces the cache store.
    pub fn with_cache(mut self, cache: Arc<dyn CacheStore>) -> Self {
        self.cache = cache;
        self
    }

    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds the request envelope.
    ///
    /// Reserved fields come first; `params` are inserted afterwards, so a
    /// param with a reserved name overrides it.
    pub fn envelope(&self, command: &str, params: Map<String, Value>) -> Map<String, Value> {
        let mut envelope = Map::new();
        envelope.insert("cmd".to_string(), Value::from(command));
        envelope.insert("lang".to_string(), Value::from(self.identity.lang()));
        envelope.insert("uuid".to_string(), Value::from(self.identity.fingerprint()));
        envelope.insert("api_key".to_string(), Value::from(self.identity.api_key()));

        for (key, value) in params {
            envelope.insert(key, value);
        }
        envelope
    }

    /// Executes `command`, serving it from the cache when possible.
    ///
    /// Successful fresh responses are cached for [`RESPONSE_TTL`]; cached
    /// responses are returned as-is without re-classification.
    pub fn execute(&self, command: &str, params: Map<String, Value>) -> ApiResult<Value> {
        let envelope = self.envelope(command, params);
        let key = cache_key(&envelope);

        if let Some(value) = self.lookup(&key) {
            debug!(cmd = command, key = %key, "Cache hit");
            return Ok(value);
        }

        debug!(cmd = command, key = %key, "Cache miss, sending request");

        let body =
            serde_json::to_vec(&envelope).map_err(|e| TransportError::Encode(e.to_string()))?;
        let response = self.transport.post_json(&self.endpoint, body)?;
        let value = decode_response(&response, &self.endpoint)?;

        if let Err(e) = self.cache.set(&key, response.body, RESPONSE_TTL) {
            warn!(cmd = command, error = %e, "Failed to store response in cache");
        }

        Ok(value)
    }

    /// Reads and decodes a cached body; any failure counts as a miss.
    fn lookup(&self, key: &str) -> Option<Value> {
        match self.cache.get(key) {
            Ok(Some(body)) => match serde_json::from_slice(&body) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(key = %key, error = %e, "Discarding undecodable cached response");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key = %key, error = %e, "Cache lookup failed");
                None
            }
        }
    }
}

/// Decodes a response body and classifies `errno` payloads.
fn decode_response(response: &TransportResponse, url: &str) -> ApiResult<Value> {
    let value: Value = match serde_json::from_slice(&response.body) {
        Ok(value) => value,
        Err(e) if response.is_success() => {
            return Err(TransportError::MalformedBody(e.to_string()).into());
        }
        Err(_) => {
            return Err(TransportError::Status {
                status: response.status,
                url: url.to_string(),
            }
            .into());
        }
    };

    if let Some(error) = remote_error(&value) {
        warn!(errno = error.code, kind = %error.kind, message = %error.message, "API returned an error");
        return Err(error.into());
    }

    if !response.is_success() {
        return Err(TransportError::Status {
            status: response.status,
            url: url.to_string(),
        }
        .into());
    }

    Ok(value)
}

/// Extracts the `errno`/`error` pair from a response object, if present.
///
/// A non-numeric `errno` is reported with code 0.
fn remote_error(value: &Value) -> Option<RemoteError> {
    let object = value.as_object()?;
    let errno = object.get("errno")?;

    let code = match errno {
        Value::Number(n) => n.as_i64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    };
    let message = object
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default();

    Some(RemoteError::new(code, message))
}
