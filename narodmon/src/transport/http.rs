//! HTTP transport abstraction for testability

use std::time::Duration;

use crate::error::TransportError;

/// Default request timeout for [`ReqwestTransport`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw answer to a POST request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Creates a response with the given status and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a `200 OK` response.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for HTTP transport operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock transports in tests.
pub trait Transport: Send + Sync {
    /// Performs an HTTP POST with a JSON body.
    ///
    /// # Arguments
    ///
    /// * `url` - The endpoint to post to
    /// * `body` - The already-encoded JSON body
    ///
    /// # Returns
    ///
    /// The response status and body, whatever the status. Only failures to
    /// obtain a response at all are errors.
    fn post_json(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn post_json(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse, TransportError> {
        (**self).post_json(url, body)
    }
}

/// Real HTTP transport implementation using reqwest.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Creates a new ReqwestTransport with default configuration.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a new ReqwestTransport with custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn post_json(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();

        // Read response body
        let body = response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| TransportError::Request(format!("failed to read response: {}", e)))?;

        Ok(TransportResponse { status, body })
    }
}
