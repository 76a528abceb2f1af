//! Error types for the webclient layer.
//!
//! # Design
//! Every failure a call can hit is a `WebError` value, including the ones
//! that used to escape as faults (malformed JSON bodies). Transport errors
//! from reqwest are classified once, in `From<reqwest::Error>`, so the rest
//! of the crate only matches on our own variants.

use std::error::Error as StdError;

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WebError>;

#[derive(Debug, Error)]
pub enum WebError {
    /// DNS resolution or TCP/TLS connect failed.
    #[error("Connection Error: {0}")]
    Connection(String),

    /// The per-request timeout supplied by the caller elapsed.
    #[error("request timed out")]
    Timeout,

    /// Non-200 status, reported only by the `*_with_err` calls.
    #[error("{status} {reason}")]
    Status { status: u16, reason: String },

    /// The body could not be decoded in the requested mode.
    #[error("failed to decode response body (status {status}): {message}")]
    Decode { status: u16, message: String },

    #[error("failed to serialize request body: {0}")]
    Serialization(String),

    /// Invalid URL or options, or the client could not be built.
    #[error("invalid request: {0}")]
    Request(String),

    #[error("transport error: {0}")]
    Transport(String),
}

impl WebError {
    /// Build a status error from the reason phrase the server sent, falling
    /// back to the standard phrase for the code.
    pub(crate) fn from_status(status: StatusCode, reason: Option<&str>) -> Self {
        let reason = reason
            .or_else(|| status.canonical_reason())
            .unwrap_or("Unknown");
        WebError::Status {
            status: status.as_u16(),
            reason: reason.to_string(),
        }
    }

    /// The HTTP status attached to this error, if the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            WebError::Status { status, .. } | WebError::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, WebError::Connection(_))
    }
}

impl From<reqwest::Error> for WebError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            WebError::Timeout
        } else if e.is_connect() {
            WebError::Connection(describe(&e))
        } else if e.is_builder() {
            WebError::Request(describe(&e))
        } else {
            WebError::Transport(describe(&e))
        }
    }
}

/// Flatten an error and its sources into one line. reqwest's own message
/// ("error sending request") hides the OS-level cause in the source chain.
fn describe(e: &dyn StdError) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
