//! Request-side types: the method, the body, and the options bag that is
//! forwarded to reqwest untouched.
//!
//! # Design
//! Bodies and options are plain data until the moment a request is built, so
//! they can be logged, cloned and reused across calls. Nothing here is
//! validated eagerly: a bad header name or URL is reported by reqwest when
//! the request is sent and surfaces as `WebError::Request`.

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::RequestBuilder;
use serde::Serialize;

use crate::error::{Result, WebError};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Payload of a POST or PUT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded` pairs.
    Form(Vec<(String, String)>),
    /// Sent as-is, as `text/plain; charset=utf-8` unless the caller sets a
    /// `content-type` through `RequestOptions`.
    Text(String),
    /// Sent as-is, as `application/octet-stream` unless the caller says
    /// otherwise.
    Bytes(Vec<u8>),
    /// Already-serialized JSON, sent with `content-type: application/json`.
    Json(String),
}

impl RequestBody {
    /// Serialize `value` to JSON. Non-ASCII text is written as UTF-8, not
    /// `\u` escapes.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_string(value)
            .map(RequestBody::Json)
            .map_err(|e| WebError::Serialization(e.to_string()))
    }

    /// Attach the body. Only `Json` overrides a caller's `content-type`; the
    /// other variants fill one in when `options` has none.
    pub(crate) fn apply(
        &self,
        builder: RequestBuilder,
        options: &RequestOptions,
    ) -> RequestBuilder {
        let default_type = |builder: RequestBuilder, value: &'static str| {
            if options.has_header(CONTENT_TYPE.as_str()) {
                builder
            } else {
                builder.header(CONTENT_TYPE, value)
            }
        };
        match self {
            // reqwest only inserts the form content-type when none is set.
            RequestBody::Form(pairs) => builder.form(pairs),
            RequestBody::Text(text) => {
                default_type(builder, "text/plain; charset=utf-8").body(text.clone())
            }
            RequestBody::Bytes(bytes) => {
                default_type(builder, "application/octet-stream").body(bytes.clone())
            }
            RequestBody::Json(json) => {
                let mut headers = HeaderMap::new();
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                // `headers` replaces an existing content-type rather than appending.
                builder.headers(headers).body(json.clone())
            }
        }
    }
}

impl fmt::Display for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestBody::Form(pairs) => {
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str("&")?;
                    }
                    write!(f, "{key}={value}")?;
                }
                Ok(())
            }
            RequestBody::Text(text) | RequestBody::Json(text) => f.write_str(text),
            RequestBody::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for RequestBody {
    fn from(pairs: Vec<(K, V)>) -> Self {
        RequestBody::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for RequestBody {
    fn from(pairs: [(K, V); N]) -> Self {
        RequestBody::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_string())
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        RequestBody::Bytes(bytes)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    Bearer(String),
    Basic {
        username: String,
        password: Option<String>,
    },
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::Bearer(_) => f.write_str("Bearer(<redacted>)"),
            Auth::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
        }
    }
}

/// Transport options forwarded to every request verbatim.
///
/// There is no default timeout; a call waits as long as the server does
/// unless `timeout` is set.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub timeout: Option<Duration>,
    pub auth: Option<Auth>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(Auth::Bearer(token.into()));
        self
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.auth = Some(Auth::Basic {
            username: username.into(),
            password,
        });
        self
    }

    pub(crate) fn has_header(&self, name: &str) -> bool {
        self.headers
            .iter()
            .any(|(header, _)| header.eq_ignore_ascii_case(name))
    }

    pub(crate) fn apply(&self, mut builder: RequestBuilder) -> RequestBuilder {
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        match &self.auth {
            Some(Auth::Bearer(token)) => builder.bearer_auth(token),
            Some(Auth::Basic { username, password }) => {
                builder.basic_auth(username, password.as_ref())
            }
            None => builder,
        }
    }
}
