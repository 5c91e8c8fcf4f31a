//! Client configuration and the INI configuration file.

mod client;
mod file;

pub use client::{ClientConfig, DEFAULT_ENDPOINT};
pub use file::{config_file_path, ApiSection, CacheSection, ConfigError, ConfigFile, HttpSection};
