//! Client configuration.

use std::time::Duration;

use crate::identity::DEFAULT_LANG;
use crate::transport::DEFAULT_TIMEOUT;

/// Default API endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://narodmon.ru/api";

/// Configuration for [`NarodmonClient`](crate::NarodmonClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// URL every command is posted to.
    pub endpoint: String,

    /// Language tag sent with every request.
    pub lang: String,

    /// HTTP request timeout for the default reqwest transport.
    ///
    /// Custom transports apply their own timeout semantics.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            lang: DEFAULT_LANG.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Set the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the language tag.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Set the HTTP timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
