//! Fixture HTTP server for exercising `webclient-core` over real sockets.
//!
//! # Design
//! Every route returns a fixed, predictable payload so client tests can
//! assert on exact values. Echo routes reflect what the client actually put
//! on the wire (form fields, raw text, JSON, headers and query pairs), which
//! is how the tests prove that bodies and options are forwarded verbatim.

use std::{collections::BTreeMap, time::Duration};

use axum::{
    body::Bytes,
    extract::{Path, Query},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

/// Payload served by `GET /json`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Greeting {
    pub message: String,
    pub items: Vec<u32>,
}

impl Greeting {
    pub fn fixture() -> Self {
        Self {
            message: "hello".to_string(),
            items: vec![1, 2, 3],
        }
    }
}

/// What `GET /inspect` saw on the incoming request.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Inspection {
    pub query: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
}

/// Reply to `POST /echo/json`: the body exactly as it arrived, and parsed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct JsonEcho {
    pub raw: String,
    pub json: Value,
}

#[derive(Debug, Deserialize)]
pub struct SlowParams {
    #[serde(default)]
    pub ms: u64,
}

pub const TEXT_BODY: &str = "hello, world";
pub const MISSING_TEXT_BODY: &str = "no such page";
pub const MALFORMED_BODY: &str = "not json";

pub fn app() -> Router {
    Router::new()
        .route("/json", get(json_greeting))
        .route("/missing", get(missing_json))
        .route("/text", get(text_greeting))
        .route("/text/missing", get(missing_text))
        .route("/malformed", get(malformed_json))
        .route("/inspect", get(inspect))
        .route("/slow", get(slow))
        .route("/echo/form", post(echo_form).put(echo_form))
        .route("/echo/text", post(echo_text))
        .route("/echo/json", post(echo_json))
        .route("/items/{id}", delete(delete_item))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn json_greeting() -> Json<Greeting> {
    Json(Greeting::fixture())
}

async fn missing_json() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}

async fn text_greeting() -> &'static str {
    TEXT_BODY
}

async fn missing_text() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, MISSING_TEXT_BODY)
}

async fn malformed_json() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], MALFORMED_BODY)
}

async fn inspect(
    Query(query): Query<BTreeMap<String, String>>,
    headers: HeaderMap,
) -> Json<Inspection> {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    Json(Inspection { query, headers })
}

async fn slow(Query(params): Query<SlowParams>) -> Json<Value> {
    debug!(ms = params.ms, "delaying response");
    tokio::time::sleep(Duration::from_millis(params.ms)).await;
    Json(json!({ "slept": params.ms }))
}

async fn echo_form(
    Form(fields): Form<BTreeMap<String, String>>,
) -> Json<BTreeMap<String, String>> {
    Json(fields)
}

async fn echo_text(body: String) -> String {
    body
}

async fn echo_json(
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<JsonEcho>, StatusCode> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if !is_json {
        return Err(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
    let raw = String::from_utf8(body.to_vec()).map_err(|_| StatusCode::BAD_REQUEST)?;
    let json = serde_json::from_str(&raw).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok(Json(JsonEcho { raw, json }))
}

async fn delete_item(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if id == "missing" {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })));
    }
    (StatusCode::OK, Json(json!({ "deleted": id })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_serializes_to_json() {
        let json = serde_json::to_value(Greeting::fixture()).unwrap();
        assert_eq!(json["message"], "hello");
        assert_eq!(json["items"], json!([1, 2, 3]));
    }

    #[test]
    fn slow_params_default_to_zero() {
        let params: SlowParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.ms, 0);
    }

    #[test]
    fn inspection_roundtrips_through_json() {
        let mut inspection = Inspection::default();
        inspection.query.insert("page".to_string(), "2".to_string());
        inspection
            .headers
            .insert("x-trace".to_string(), "abc".to_string());
        let json = serde_json::to_string(&inspection).unwrap();
        let back: Inspection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inspection);
    }
}
