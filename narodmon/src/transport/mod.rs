//! HTTP transport collaborator.
//!
//! The client only needs one capability from HTTP: POST a JSON body and get
//! the status and raw body back. [`ReqwestTransport`] is the default
//! implementation; tests and embedders can supply their own [`Transport`].

mod http;

pub use http::{ReqwestTransport, Transport, TransportResponse, DEFAULT_TIMEOUT};

#[cfg(test)]
pub use http::tests::MockTransport;
