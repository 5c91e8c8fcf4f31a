//! INI configuration file.
//!
//! ```ini
//! [api]
//! uuid = my-device-id
//! api_key = XXXXXXXXXXXX
//! lang = en
//! endpoint = http://narodmon.ru/api
//!
//! [http]
//! timeout_secs = 30
//!
//! [cache]
//! enabled = true
//! max_size_bytes = 16777216
//! ```
//!
//! Only `api.uuid` and `api.api_key` are required; every other key falls
//! back to the [`ClientConfig`] and [`MemoryCache`] defaults.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use crate::cache::{MemoryCache, DEFAULT_MAX_SIZE_BYTES};
use crate::client::NarodmonClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::ReqwestTransport;

/// Errors raised while loading or applying a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform configuration directory could be determined.
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    /// The file could not be read or parsed.
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: ini::Error },

    /// INI text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// The file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A required key is absent or empty.
    #[error("missing required key {section}.{key}")]
    MissingKey {
        section: &'static str,
        key: &'static str,
    },

    /// A key holds a value of the wrong shape.
    #[error("invalid value '{value}' for {section}.{key}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
    },

    /// The client could not be constructed.
    #[error("failed to create client: {0}")]
    Client(#[from] ApiError),
}

/// Returns the default configuration file path
/// (`<config dir>/narodmon/config.ini`).
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("narodmon").join("config.ini"))
        .ok_or(ConfigError::NoConfigDir)
}

/// `[api]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSection {
    /// Raw device identifier (hashed before use).
    pub device_id: String,
    pub api_key: String,
    pub lang: String,
    pub endpoint: String,
}

/// `[http]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSection {
    pub timeout_secs: u64,
}

/// `[cache]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSection {
    pub enabled: bool,
    pub max_size_bytes: u64,
}

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub api: ApiSection,
    pub http: HttpSection,
    pub cache: CacheSection,
}

impl ConfigFile {
    /// Load from the default path.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path()?)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini(&ini)
    }

    /// Parse INI text.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let defaults = ClientConfig::default();

        let api = ApiSection {
            device_id: required(ini, "api", "uuid")?,
            api_key: required(ini, "api", "api_key")?,
            lang: optional(ini, "api", "lang").unwrap_or(defaults.lang),
            endpoint: optional(ini, "api", "endpoint").unwrap_or(defaults.endpoint),
        };

        let http = HttpSection {
            timeout_secs: parsed(ini, "http", "timeout_secs")?
                .unwrap_or(defaults.timeout.as_secs()),
        };

        let cache = CacheSection {
            enabled: parse_bool(ini, "cache", "enabled")?.unwrap_or(false),
            max_size_bytes: parsed(ini, "cache", "max_size_bytes")?
                .unwrap_or(DEFAULT_MAX_SIZE_BYTES),
        };

        Ok(Self { api, http, cache })
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut ini = Ini::new();
        ini.with_section(Some("api"))
            .set("uuid", self.api.device_id.as_str())
            .set("api_key", self.api.api_key.as_str())
            .set("lang", self.api.lang.as_str())
            .set("endpoint", self.api.endpoint.as_str());
        ini.with_section(Some("http"))
            .set("timeout_secs", self.http.timeout_secs.to_string());
        ini.with_section(Some("cache"))
            .set("enabled", self.cache.enabled.to_string())
            .set("max_size_bytes", self.cache.max_size_bytes.to_string());

        ini.write_to_file(path).map_err(write_err)
    }

    /// The client settings held by this file.
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_endpoint(self.api.endpoint.clone())
            .with_lang(self.api.lang.clone())
            .with_timeout(Duration::from_secs(self.http.timeout_secs))
    }

    /// Build a reqwest-backed client, with a memory cache when enabled.
    pub fn build_client(&self) -> Result<NarodmonClient<ReqwestTransport>, ConfigError> {
        let client = NarodmonClient::from_config(
            &self.api.device_id,
            self.api.api_key.clone(),
            self.to_client_config(),
        )?;

        if self.cache.enabled {
            Ok(client.with_cache(Arc::new(MemoryCache::new(self.cache.max_size_bytes))))
        } else {
            Ok(client)
        }
    }
}

fn optional(ini: &Ini, section: &str, key: &str) -> Option<String> {
    ini.section(Some(section))
        .and_then(|props| props.get(key))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn required(ini: &Ini, section: &'static str, key: &'static str) -> Result<String, ConfigError> {
    optional(ini, section, key).ok_or(ConfigError::MissingKey { section, key })
}

fn parsed(ini: &Ini, section: &'static str, key: &'static str) -> Result<Option<u64>, ConfigError> {
    optional(ini, section, key)
        .map(|value| {
            value.parse().map_err(|_| ConfigError::InvalidValue {
                section,
                key,
                value,
            })
        })
        .transpose()
}

fn parse_bool(
    ini: &Ini,
    section: &'static str,
    key: &'static str,
) -> Result<Option<bool>, ConfigError> {
    optional(ini, section, key)
        .map(|value| match value.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                section,
                key,
                value,
            }),
        })
        .transpose()
}
