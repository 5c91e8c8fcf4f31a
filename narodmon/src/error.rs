//! Error types for narodmon API calls.
//!
//! Failures fall into two families:
//! - [`TransportError`]: the request never produced a usable answer
//!   (connection failure, non-2xx status without a JSON body, malformed body)
//! - [`RemoteError`]: the server answered with an `errno` payload, classified
//!   into a [`RemoteErrorKind`]

use std::fmt;

use thiserror::Error;

/// Result type for narodmon API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Transport-level failures.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    ClientBuild(String),

    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status and no decodable body.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body is not valid JSON.
    #[error("malformed response body: {0}")]
    MalformedBody(String),

    /// The request envelope could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(String),
}

/// Classified `errno` values returned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteErrorKind {
    /// 400: malformed request.
    SyntaxError,
    /// 401: the command needs a logged-in session.
    AuthorizationRequired,
    /// 403: the API key or device is not allowed to do this.
    AccessDenied,
    /// 404: unknown command or object.
    NotFound,
    /// 423: the API key or device is blocked.
    Blocked,
    /// 429: request rate limit exceeded.
    TooManyRequests,
    /// 434: the requested object is disabled.
    ObjectDisabled,
    /// 503: the server is temporarily unavailable.
    ServerUnavailable,
    /// Any other code.
    Generic,
}

impl RemoteErrorKind {
    /// Maps an `errno` value to its kind.
    pub fn from_code(code: i64) -> Self {
        match code {
            400 => Self::SyntaxError,
            401 => Self::AuthorizationRequired,
            403 => Self::AccessDenied,
            404 => Self::NotFound,
            423 => Self::Blocked,
            429 => Self::TooManyRequests,
            434 => Self::ObjectDisabled,
            503 => Self::ServerUnavailable,
            _ => Self::Generic,
        }
    }

    /// The `errno` value of a classified kind, `None` for [`Self::Generic`].
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::SyntaxError => Some(400),
            Self::AuthorizationRequired => Some(401),
            Self::AccessDenied => Some(403),
            Self::NotFound => Some(404),
            Self::Blocked => Some(423),
            Self::TooManyRequests => Some(429),
            Self::ObjectDisabled => Some(434),
            Self::ServerUnavailable => Some(503),
            Self::Generic => None,
        }
    }
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SyntaxError => "syntax error",
            Self::AuthorizationRequired => "authorization required",
            Self::AccessDenied => "access denied",
            Self::NotFound => "not found",
            Self::Blocked => "blocked",
            Self::TooManyRequests => "too many requests",
            Self::ObjectDisabled => "object disabled",
            Self::ServerUnavailable => "server unavailable",
            Self::Generic => "remote error",
        };
        f.write_str(name)
    }
}

/// An error reported by the server through an `errno` payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} ({code}): {message}")]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    pub code: i64,
    pub message: String,
}

impl RemoteError {
    /// Creates a remote error, classifying `code`.
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            kind: RemoteErrorKind::from_code(code),
            code,
            message: message.into(),
        }
    }
}

/// Any failure of a narodmon API call.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl ApiError {
    /// The remote `errno`, if the server reported one.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Remote(e) => Some(e.code),
            Self::Transport(_) => None,
        }
    }

    /// The classified kind, if the server reported an error.
    pub fn remote_kind(&self) -> Option<RemoteErrorKind> {
        match self {
            Self::Remote(e) => Some(e.kind),
            Self::Transport(_) => None,
        }
    }

    /// Whether this is a transport-level failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
