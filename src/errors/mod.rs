//! Error types for the Unit4 client.
//!
//! Four failure channels, mirroring what a caller can actually do about
//! them: fix a missing database, branch on a decoded API rejection, treat
//! the transport failure as opaque, or restart the OAuth2 flow.

use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

/// Root error type for all client operations.
#[derive(Error, Debug)]
pub enum Unit4Error {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl Unit4Error {
    /// HTTP status code of the failure, when one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Request(e) => Some(e.status),
            Self::Transport(TransportError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Precondition failure: a resource method was called before a database
/// (tenant namespace) was configured. Raised before any network activity.
#[derive(Error, Debug)]
#[error("{operation} requires a database to be set, use Unit4Client::set_database")]
pub struct DatabaseError {
    /// Name of the resource operation that was attempted.
    pub operation: String,
}

impl DatabaseError {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
        }
    }
}

/// Remote rejection: the server returned an HTTP error whose body decoded
/// as JSON. Carries the decoded payload so callers can branch on
/// API-specific error codes.
#[derive(Error, Debug)]
#[error("request failed with status {status}: {payload}")]
pub struct RequestError {
    pub status: u16,
    pub payload: serde_json::Value,
}

/// Transport-level failure: network problems, or an HTTP failure whose body
/// is not JSON. Propagated unchanged; the client does not interpret it.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("server returned status {status}")]
    Status { status: u16, body: Bytes },

    #[error("invalid response body: {message}")]
    InvalidBody { message: String },
}

/// The token endpoint returned a response missing the expected fields.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("token endpoint response is not a valid token: {message}")]
    InvalidTokenResponse { message: String },
}

/// Result alias used throughout the crate.
pub type Unit4Result<T> = Result<T, Unit4Error>;
