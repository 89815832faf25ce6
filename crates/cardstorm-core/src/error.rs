//! Shared error type across cardstorm crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed parameter or config.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, CardstormError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum CardstormError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version: {0}")]
    UnsupportedVersion(u32),
    #[error("internal: {0}")]
    Internal(String),
}

impl CardstormError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            CardstormError::BadRequest(_) => ClientCode::BadRequest,
            CardstormError::UnsupportedVersion(_) => ClientCode::UnsupportedVersion,
            CardstormError::Internal(_) => ClientCode::Internal,
        }
    }
}
