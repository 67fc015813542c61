//! RPC error types with stable wire codes.

use std::fmt;

/// Stable error codes carried in error envelopes.
///
/// Wallets match on these numerically, so values are append-only.
pub mod codes {
    /// Request completed.
    pub const SUCCESS: i32 = 0;
    /// Malformed or missing request parameter.
    pub const BAD_PARAMETER: i32 = 10;
    /// Not enough decoy outputs exist on-chain for a requested amount.
    pub const CANT_GET_DECOY_OUTPUTS: i32 = 20;
    /// Unexpected fault inside a handler.
    pub const INTERNAL_ERROR: i32 = 30;
}

/// How the middleware maps a handler error onto the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or mistyped request field: 400 with the status/error envelope.
    BadArgument,
    /// Domain-level refusal: 400 with the errorCode/errorMessage envelope.
    Rejection,
    /// Unexpected fault: 500 with a generic prefix.
    Internal,
}

/// A classified handler failure.
///
/// Handlers return these as values; the middleware is the only place that
/// turns them into HTTP responses.
#[derive(Debug, Clone)]
pub struct RpcError {
    /// Wire classification
    pub kind: ErrorKind,
    /// Stable numeric code from [`codes`]
    pub code: i32,
    /// Human-readable message
    pub message: String,
}

impl RpcError {
    /// A missing or mistyped request field.
    pub fn bad_argument(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::BadArgument,
            code: codes::BAD_PARAMETER,
            message: message.into(),
        }
    }

    /// A domain-level refusal carrying a stable code.
    pub fn rejection(code: i32, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Rejection,
            code,
            message: message.into(),
        }
    }

    /// An unexpected fault.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Internal,
            code: codes::INTERNAL_ERROR,
            message: message.into(),
        }
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for RpcError {}

/// Result type for handler operations
pub type RpcResult<T> = Result<T, RpcError>;

/// Server lifecycle errors (construction and startup, never wire-visible)
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration rejected at construction
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Listener socket could not be bound
    #[error("server bind error: {0}")]
    Bind(String),

    /// start() called while the listener task is live
    #[error("server already running")]
    AlreadyRunning,

    /// The listener task could not be joined during stop()
    #[error("server shutdown error: {0}")]
    Shutdown(String),
}
