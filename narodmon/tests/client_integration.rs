//! Integration tests for the narodmon client.
//!
//! These tests drive the public API end to end with a scripted transport:
//! - Façade → envelope on the wire
//! - Error classification and cache interaction
//! - Concurrent use of one client from several threads
//!
//! Run with: `cargo test --test client_integration`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use narodmon::cache::{MemoryCache, NullCache};
use narodmon::identity::md5_hex;
use narodmon::transport::{Transport, TransportResponse};
use narodmon::{ApiError, ClientConfig, NarodmonClient, RemoteErrorKind, TransportError};

// ============================================================================
// Helper Types
// ============================================================================

/// Transport answering every request with the same status and body.
struct ScriptedTransport {
    status: u16,
    body: String,
    calls: AtomicUsize,
    bodies: Mutex<Vec<Value>>,
}

impl ScriptedTransport {
    fn new(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.to_string(),
            calls: AtomicUsize::new(0),
            bodies: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_body(&self) -> Value {
        self.bodies.lock().unwrap().last().cloned().unwrap()
    }
}

impl Transport for ScriptedTransport {
    fn post_json(&self, _url: &str, body: Vec<u8>) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies
            .lock()
            .unwrap()
            .push(serde_json::from_slice(&body).unwrap());
        Ok(TransportResponse::new(self.status, self.body.clone()))
    }
}

fn client(transport: &Arc<ScriptedTransport>) -> NarodmonClient<Arc<ScriptedTransport>> {
    NarodmonClient::with_transport(
        Arc::clone(transport),
        "uuid",
        "apiKey",
        ClientConfig::default(),
    )
}

// ============================================================================
// Integration Tests
// ============================================================================

#[test]
fn test_login_sends_salted_hash() {
    let transport = ScriptedTransport::new(200, r#"{"login":"foo"}"#);
    let client = client(&transport);

    let response = client.login("foo", "bar").unwrap();

    assert_eq!(response, json!({"login": "foo"}));
    let body = transport.last_body();
    assert_eq!(body["cmd"], json!("login"));
    assert_eq!(body["login"], json!("foo"));
    assert_eq!(
        body["hash"],
        json!(md5_hex(&format!("{}{}", md5_hex("uuid"), md5_hex("bar"))))
    );
    assert!(!body.to_string().contains("\"bar\""));
}

#[test]
fn test_too_many_requests_is_typed_and_not_cached() {
    let transport = ScriptedTransport::new(200, r#"{"errno":429,"error":"Too many requests"}"#);
    let cache = Arc::new(MemoryCache::default());
    let client = client(&transport).with_cache(cache.clone());

    for _ in 0..2 {
        match client.sensor_near(false, true, &[1], None, None, None) {
            Err(ApiError::Remote(e)) => {
                assert_eq!(e.kind, RemoteErrorKind::TooManyRequests);
                assert_eq!(e.code, 429);
                assert_eq!(e.message, "Too many requests");
            }
            other => panic!("expected TooManyRequests, got {:?}", other),
        }
    }

    assert_eq!(transport.calls(), 2);
    assert_eq!(cache.entry_count(), 0);
}

#[test]
fn test_identical_calls_hit_the_cache_once() {
    let transport = ScriptedTransport::new(200, r#"{"devices":[{"id":1,"sensors":[]}]}"#);
    let client = client(&transport).with_cache(Arc::new(MemoryCache::default()));

    let first = client.public_sensors(&[1, 2, 3], Some(50), None, None).unwrap();
    let second = client.public_sensors(&[1, 2, 3], Some(50), None, None).unwrap();

    assert_eq!(transport.calls(), 1);
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[test]
fn test_null_cache_calls_every_time() {
    let transport = ScriptedTransport::new(200, "{}");
    let client = client(&transport).with_cache(Arc::new(NullCache));

    client.my_sensors(&[]).unwrap();
    client.my_sensors(&[]).unwrap();

    assert_eq!(transport.calls(), 2);
}

#[test]
fn test_sensor_fav_field_presence() {
    let transport = ScriptedTransport::new(200, "{}");
    let client = client(&transport);

    client.sensor_fav(None).unwrap();
    assert!(transport.last_body().get("sensors").is_none());

    client.sensor_fav(Some(&[3, 1, 2][..])).unwrap();
    assert_eq!(transport.last_body()["sensors"], json!([3, 1, 2]));
}

#[test]
fn test_server_error_status_without_body() {
    let transport = ScriptedTransport::new(503, "Service Unavailable");
    let client = client(&transport);

    let err = client.get_location().unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(
        err,
        ApiError::Transport(TransportError::Status { status: 503, .. })
    ));
}

#[test]
fn test_server_unavailable_errno() {
    let transport = ScriptedTransport::new(200, r#"{"errno":503,"error":"maintenance"}"#);
    let client = client(&transport);

    let err = client.get_location().unwrap_err();

    assert_eq!(err.remote_kind(), Some(RemoteErrorKind::ServerUnavailable));
    assert_eq!(err.to_string(), "server unavailable (503): maintenance");
}

#[test]
fn test_concurrent_calls_share_cache() {
    let transport = ScriptedTransport::new(200, r#"{"id":42}"#);
    let client = Arc::new(client(&transport).with_cache(Arc::new(MemoryCache::default())));

    // Prime the cache, then read it from many threads at once
    client.sensor_dev(42).unwrap();

    std::thread::scope(|scope| {
        for _ in 0..8 {
            let client = Arc::clone(&client);
            scope.spawn(move || {
                for _ in 0..10 {
                    assert_eq!(client.sensor_dev(42).unwrap(), json!({"id": 42}));
                }
            });
        }
    });

    assert_eq!(transport.calls(), 1);
}
