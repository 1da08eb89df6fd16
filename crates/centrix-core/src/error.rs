//! Shared error type across centrix crates.

use thiserror::Error;

use crate::protocol::reply::ApiError;

/// Stable, machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Caller input could not be serialized.
    Encode,
    /// Send attempted on a pipe with no commands.
    PipeEmpty,
    /// Dynamic endpoint resolution failed.
    Endpoint,
    /// Network, DNS or TLS failure.
    Transport,
    /// Server answered with a non-200 status.
    StatusCode,
    /// Call cancelled by the caller.
    Cancelled,
    /// Call deadline elapsed.
    DeadlineExceeded,
    /// Reply stream could not be trusted.
    MalformedResponse,
    /// Server reported an error for one command.
    Api,
    /// Reply result did not match the expected shape.
    Decode,
    /// Invalid configuration.
    Config,
}

impl ErrorCode {
    /// String representation used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Encode => "ENCODE",
            ErrorCode::PipeEmpty => "PIPE_EMPTY",
            ErrorCode::Endpoint => "ENDPOINT",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::StatusCode => "STATUS_CODE",
            ErrorCode::Cancelled => "CANCELLED",
            ErrorCode::DeadlineExceeded => "DEADLINE_EXCEEDED",
            ErrorCode::MalformedResponse => "MALFORMED_RESPONSE",
            ErrorCode::Api => "API",
            ErrorCode::Decode => "DECODE",
            ErrorCode::Config => "CONFIG",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, CentrixError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum CentrixError {
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("no commands in pipe")]
    PipeEmpty,
    #[error("endpoint resolve failed: {0}")]
    Endpoint(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("wrong status code: {0}")]
    StatusCode(u16),
    #[error("request cancelled")]
    Cancelled,
    #[error("deadline exceeded")]
    DeadlineExceeded,
    #[error("malformed response returned from server: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("config: {0}")]
    Config(String),
}

impl CentrixError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            CentrixError::Encode(_) => ErrorCode::Encode,
            CentrixError::PipeEmpty => ErrorCode::PipeEmpty,
            CentrixError::Endpoint(_) => ErrorCode::Endpoint,
            CentrixError::Transport(_) => ErrorCode::Transport,
            CentrixError::StatusCode(_) => ErrorCode::StatusCode,
            CentrixError::Cancelled => ErrorCode::Cancelled,
            CentrixError::DeadlineExceeded => ErrorCode::DeadlineExceeded,
            CentrixError::MalformedResponse(_) => ErrorCode::MalformedResponse,
            CentrixError::Api(_) => ErrorCode::Api,
            CentrixError::Decode(_) => ErrorCode::Decode,
            CentrixError::Config(_) => ErrorCode::Config,
        }
    }

    /// The server-reported error, if this is a per-command failure.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            CentrixError::Api(e) => Some(e),
            _ => None,
        }
    }
}
