//! The narodmon API client.
//!
//! # Architecture
//!
//! ```text
//! NarodmonClient ───► Command ───► RequestPipeline ───► CacheStore
//!  (one method          (cmd +        (envelope, key,      │
//!   per command)         params)       classification)     ▼
//!                                            └────────► Transport
//! ```

mod api;
mod command;
mod pipeline;

pub use api::NarodmonClient;
pub use command::{
    Command, CLIENT_PLATFORM, CLIENT_VERSION, DEFAULT_RADIUS, MY_SENSORS_RADIUS,
};
pub use pipeline::RequestPipeline;
