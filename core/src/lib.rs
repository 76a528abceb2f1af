//! One-shot async HTTP calls with JSON and text decoding.
//!
//! # Overview
//! Nine calls cover the common cases: `get`, `get_with_err`, `get_text`,
//! `get_text_with_err`, `post`, `post_text`, `post_json`, `put` and
//! `delete`. Each exists as a free function (fresh connection per call, see
//! [`oneshot`]) and as a method on [`WebClient`] (shared connection pool).
//!
//! # Design
//! - Failures never escape as panics: connection errors, timeouts and
//!   malformed bodies are all `WebError` values.
//! - Plain calls pass non-2xx responses through as ordinary bodies. Only the
//!   `*_with_err` calls inspect the status, and they return the body and the
//!   error together in a [`WithErr`].
//! - Request bodies and options are plain data ([`RequestBody`],
//!   [`RequestOptions`]) applied to reqwest when the request is sent.
//! - Requests and statuses are logged through `tracing` at DEBUG;
//!   connection failures at ERROR. No subscriber is installed here.
//!
//! ```no_run
//! use serde_json::Value;
//! use webclient_core::{RequestOptions, WithErr};
//!
//! # async fn demo() -> webclient_core::Result<()> {
//! let options = RequestOptions::new().header("accept", "application/json");
//! let body: Value = webclient_core::get("http://localhost:3000/json", &options).await?;
//!
//! let reply: WithErr<Value> =
//!     webclient_core::get_with_err("http://localhost:3000/missing", &options).await;
//! let (page, error) = reply.into_parts();
//! # let _ = (body, page, error);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod oneshot;
pub mod types;

pub use client::WebClient;
pub use config::ClientConfig;
pub use error::{Result, WebError};
pub use http::{Auth, HttpMethod, RequestBody, RequestOptions};
pub use oneshot::{
    delete, get, get_text, get_text_with_err, get_with_err, post, post_json, post_text, put,
};
pub use types::WithErr;
