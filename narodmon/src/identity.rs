//! Session identity and credential hashing.
//!
//! The narodmon API never sees the raw device identifier or the user's
//! password. The device is identified by the lower-case hex MD5 of its raw
//! identifier (the *fingerprint*), and logins send
//! `md5(fingerprint + md5(password))`.

use md5::{Digest, Md5};

/// Default language tag sent with every request.
pub const DEFAULT_LANG: &str = "ru";

/// Computes the lower-case hex MD5 digest of `input`.
pub fn md5_hex(input: &str) -> String {
    format!("{:x}", Md5::digest(input.as_bytes())).to_lowercase()
}

/// Immutable per-client identity.
///
/// Built once at client construction and never mutated. Two identities
/// created from the same raw identifier always carry the same fingerprint.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    fingerprint: String,
    api_key: String,
    lang: String,
}

impl SessionIdentity {
    /// Creates an identity, hashing the raw device identifier.
    ///
    /// # Arguments
    ///
    /// * `device_id` - Raw device identifier (hashed, never sent as-is)
    /// * `api_key` - API key issued by narodmon (passed through verbatim)
    /// * `lang` - Language tag for server messages
    pub fn new(device_id: &str, api_key: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            fingerprint: md5_hex(device_id),
            api_key: api_key.into(),
            lang: lang.into(),
        }
    }

    /// The hashed device identifier sent as `uuid`.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// The API key sent as `api_key`.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The language tag sent as `lang`.
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Computes the login hash for `password`.
    ///
    /// The composition order (fingerprint outer, password digest inner) is
    /// fixed by the server.
    pub fn password_hash(&self, password: &str) -> String {
        md5_hex(&format!("{}{}", self.fingerprint, md5_hex(password)))
    }
}

// The API key is a credential; keep it out of debug output.
impl std::fmt::Debug for SessionIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIdentity")
            .field("fingerprint", &self.fingerprint)
            .field("api_key", &"<redacted>")
            .field("lang", &self.lang)
            .finish()
    }
}
