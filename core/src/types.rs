//! The `(body, error)` pair returned by the `*_with_err` calls.

use tracing::debug;

use crate::error::{Result, WebError};

/// A decoded body together with an optional error.
///
/// Unlike `Result`, both halves can be present at once: a 404 still carries
/// its decoded error page. At least one of the two is always set.
#[derive(Debug)]
pub struct WithErr<T> {
    body: Option<T>,
    error: Option<WebError>,
}

impl<T> WithErr<T> {
    pub fn ok(body: T) -> Self {
        Self {
            body: Some(body),
            error: None,
        }
    }

    pub fn failed(error: WebError) -> Self {
        Self {
            body: None,
            error: Some(error),
        }
    }

    /// Combine a decode outcome with the status check of the same response.
    ///
    /// When both fail, the status error wins and the body is left unset.
    pub(crate) fn assemble(decoded: Result<T>, status_error: Option<WebError>) -> Self {
        match (decoded, status_error) {
            (Ok(body), error) => Self {
                body: Some(body),
                error,
            },
            (Err(decode_error), Some(status_error)) => {
                debug!(error = %decode_error, "dropping decode error in favour of status error");
                Self::failed(status_error)
            }
            (Err(decode_error), None) => Self::failed(decode_error),
        }
    }

    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    pub fn error(&self) -> Option<&WebError> {
        self.error.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_parts(self) -> (Option<T>, Option<WebError>) {
        (self.body, self.error)
    }

    /// Collapse into a `Result`, discarding the body if an error is present.
    pub fn into_result(self) -> Result<T> {
        match (self.body, self.error) {
            (_, Some(error)) => Err(error),
            (Some(body), None) => Ok(body),
            (None, None) => Err(WebError::Transport(
                "response carried neither body nor error".to_string(),
            )),
        }
    }
}
