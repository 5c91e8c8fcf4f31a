//! narodmon - client for the narodmon.ru sensor network API
//!
//! This library talks to the narodmon.ru JSON API: it identifies the device
//! by a hashed identifier, issues commands over HTTP POST, maps server
//! `errno` codes to typed errors and can cache successful responses for five
//! minutes.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use narodmon::cache::MemoryCache;
//! use narodmon::{ApiError, NarodmonClient, RemoteErrorKind};
//!
//! let client = NarodmonClient::new("my-device-id", "API_KEY")?
//!     .with_cache(Arc::new(MemoryCache::default()));
//!
//! match client.my_sensors(&[]) {
//!     Ok(devices) => println!("{}", devices),
//!     Err(e) if e.remote_kind() == Some(RemoteErrorKind::AuthorizationRequired) => {
//!         client.login("user", "password")?;
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok::<(), ApiError>(())
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod model;
pub mod transport;

pub use client::{Command, NarodmonClient};
pub use config::{ClientConfig, ConfigFile};
pub use error::{ApiError, ApiResult, RemoteError, RemoteErrorKind, TransportError};
pub use identity::SessionIdentity;
