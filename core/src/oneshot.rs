//! Free functions that open a fresh connection scope per call.
//!
//! Each function builds its own `WebClient` with pooling disabled, sends one
//! request, and drops the client before returning. Dropping the returned
//! future early (cancellation, an outer timeout) drops the client with it, so
//! the connection is released on every exit path. Use a shared `WebClient`
//! instead when connection reuse matters.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::WebClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{RequestBody, RequestOptions};
use crate::types::WithErr;

fn scoped_client() -> Result<WebClient> {
    WebClient::new(&ClientConfig {
        pool_max_idle_per_host: 0,
        ..ClientConfig::from_env()
    })
}

pub async fn get<T: DeserializeOwned>(url: &str, options: &RequestOptions) -> Result<T> {
    scoped_client()?.get(url, options).await
}

pub async fn get_with_err<T: DeserializeOwned>(url: &str, options: &RequestOptions) -> WithErr<T> {
    match scoped_client() {
        Ok(client) => client.get_with_err(url, options).await,
        Err(e) => WithErr::failed(e),
    }
}

pub async fn get_text(url: &str, options: &RequestOptions) -> Result<String> {
    scoped_client()?.get_text(url, options).await
}

pub async fn get_text_with_err(url: &str, options: &RequestOptions) -> WithErr<String> {
    match scoped_client() {
        Ok(client) => client.get_text_with_err(url, options).await,
        Err(e) => WithErr::failed(e),
    }
}

pub async fn post<T: DeserializeOwned>(
    url: &str,
    data: impl Into<RequestBody>,
    options: &RequestOptions,
) -> Result<T> {
    scoped_client()?.post(url, data, options).await
}

pub async fn post_text(
    url: &str,
    data: impl Into<RequestBody>,
    options: &RequestOptions,
) -> Result<String> {
    scoped_client()?.post_text(url, data, options).await
}

pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
    url: &str,
    data: &B,
    options: &RequestOptions,
) -> Result<T> {
    scoped_client()?.post_json(url, data, options).await
}

pub async fn put<T: DeserializeOwned>(
    url: &str,
    data: impl Into<RequestBody>,
    options: &RequestOptions,
) -> Result<T> {
    scoped_client()?.put(url, data, options).await
}

pub async fn delete<T: DeserializeOwned>(url: &str, options: &RequestOptions) -> Result<T> {
    scoped_client()?.delete(url, options).await
}
