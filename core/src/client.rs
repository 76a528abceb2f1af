//! Async HTTP client with JSON and text convenience calls.
//!
//! # Design
//! `WebClient` wraps one `reqwest::Client`, so every clone shares the same
//! connection pool for as long as any clone lives. Each call is still fully
//! independent: one request, one response, no retries, no state carried
//! between calls.
//!
//! Two result conventions are offered:
//! - plain calls (`get`, `post`, ...) return `Result<T>`. A non-2xx status
//!   is *not* an error; the body is decoded and returned as usual.
//! - `*_with_err` calls return `WithErr<T>`, which reports any status other
//!   than 200 as `WebError::Status` while still attaching the decoded body.

use hyper::ext::ReasonPhrase;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::{Result, WebError};
use crate::http::{HttpMethod, RequestBody, RequestOptions};
use crate::types::WithErr;

#[derive(Debug, Clone)]
pub struct WebClient {
    inner: reqwest::Client,
}

impl WebClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            inner: config.build_client()?,
        })
    }

    /// Build a client from `ClientConfig::from_env()`.
    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::from_env())
    }

    /// GET `url` and decode the body as JSON.
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<T> {
        self.json(HttpMethod::Get, url, None, options).await
    }

    /// GET `url` and decode the body as JSON, reporting any status other
    /// than 200 alongside the body.
    pub async fn get_with_err<T: DeserializeOwned>(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> WithErr<T> {
        match self.send(HttpMethod::Get, url, None, options).await {
            Ok(response) => {
                let status_error = check_status(&response);
                WithErr::assemble(read_json(response).await, status_error)
            }
            Err(e) => WithErr::failed(e),
        }
    }

    pub async fn get_text(&self, url: &str, options: &RequestOptions) -> Result<String> {
        self.text(HttpMethod::Get, url, None, options).await
    }

    pub async fn get_text_with_err(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> WithErr<String> {
        match self.send(HttpMethod::Get, url, None, options).await {
            Ok(response) => {
                let status_error = check_status(&response);
                WithErr::assemble(read_text(response).await, status_error)
            }
            Err(e) => WithErr::failed(e),
        }
    }

    /// POST a form-encoded (or raw) body and decode the response as JSON.
    pub async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        data: impl Into<RequestBody>,
        options: &RequestOptions,
    ) -> Result<T> {
        let body = data.into();
        self.json(HttpMethod::Post, url, Some(&body), options).await
    }

    pub async fn post_text(
        &self,
        url: &str,
        data: impl Into<RequestBody>,
        options: &RequestOptions,
    ) -> Result<String> {
        let body = data.into();
        self.text(HttpMethod::Post, url, Some(&body), options).await
    }

    /// POST `data` serialized as JSON and decode the response as JSON.
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        data: &B,
        options: &RequestOptions,
    ) -> Result<T> {
        let body = RequestBody::json(data)?;
        self.json(HttpMethod::Post, url, Some(&body), options).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        url: &str,
        data: impl Into<RequestBody>,
        options: &RequestOptions,
    ) -> Result<T> {
        let body = data.into();
        self.json(HttpMethod::Put, url, Some(&body), options).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<T> {
        self.json(HttpMethod::Delete, url, None, options).await
    }

    async fn json<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&RequestBody>,
        options: &RequestOptions,
    ) -> Result<T> {
        let response = self.send(method, url, body, options).await?;
        read_json(response).await
    }

    async fn text(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&RequestBody>,
        options: &RequestOptions,
    ) -> Result<String> {
        let response = self.send(method, url, body, options).await?;
        read_text(response).await
    }

    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&RequestBody>,
        options: &RequestOptions,
    ) -> Result<Response> {
        match body {
            Some(body) => debug!(%method, url, %body, "send request"),
            None => debug!(%method, url, "send request"),
        }

        let mut request = options.apply(self.inner.request(method.into(), url));
        if let Some(body) = body {
            request = body.apply(request, options);
        }

        let response = request.send().await.map_err(|e| {
            let err = WebError::from(e);
            if err.is_connection() {
                error!(%method, url, error = %err, "connection failed");
            } else {
                debug!(%method, url, error = %err, "request failed");
            }
            err
        })?;

        debug!(%method, url, status = response.status().as_u16(), "received response");
        Ok(response)
    }
}

/// Only exactly 200 passes. hyper attaches `ReasonPhrase` when the server's
/// phrase differs from the standard one for the code.
fn check_status(response: &Response) -> Option<WebError> {
    let status = response.status();
    if status == StatusCode::OK {
        return None;
    }
    let reason = response
        .extensions()
        .get::<ReasonPhrase>()
        .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()));
    Some(WebError::from_status(status, reason.as_deref()))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| WebError::Decode {
        status: status.as_u16(),
        message: e.to_string(),
    })
}

async fn read_text(response: Response) -> Result<String> {
    Ok(response.text().await?)
}
