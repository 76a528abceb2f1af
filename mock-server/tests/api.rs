use std::collections::BTreeMap;

use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{
    app, Greeting, Inspection, JsonEcho, MALFORMED_BODY, MISSING_TEXT_BODY, TEXT_BODY,
};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn request(method: &str, uri: &str, content_type: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, content_type)
        .body(body.to_string())
        .unwrap()
}

// --- json ---

#[tokio::test]
async fn json_returns_greeting() {
    let resp = app().oneshot(get("/json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let greeting: Greeting = body_json(resp).await;
    assert_eq!(greeting, Greeting::fixture());
}

#[tokio::test]
async fn missing_returns_404_with_json_body() {
    let resp = app().oneshot(get("/missing")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({ "error": "not found" }));
}

#[tokio::test]
async fn malformed_claims_json_but_is_not() {
    let resp = app().oneshot(get("/malformed")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(body_bytes(resp).await, MALFORMED_BODY.as_bytes());
}

// --- text ---

#[tokio::test]
async fn text_returns_plain_body() {
    let resp = app().oneshot(get("/text")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, TEXT_BODY.as_bytes());
}

#[tokio::test]
async fn missing_text_returns_404() {
    let resp = app().oneshot(get("/text/missing")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_bytes(resp).await, MISSING_TEXT_BODY.as_bytes());
}

// --- inspect ---

#[tokio::test]
async fn inspect_echoes_query_and_headers() {
    let req = Request::builder()
        .uri("/inspect?page=2&sort=asc")
        .header("x-trace", "abc")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let seen: Inspection = body_json(resp).await;
    assert_eq!(seen.query["page"], "2");
    assert_eq!(seen.query["sort"], "asc");
    assert_eq!(seen.headers["x-trace"], "abc");
}

// --- slow ---

#[tokio::test]
async fn slow_reports_delay() {
    let resp = app().oneshot(get("/slow?ms=5")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["slept"], 5);
}

// --- echo ---

#[tokio::test]
async fn echo_form_returns_fields_as_json() {
    let resp = app()
        .oneshot(request(
            "POST",
            "/echo/form",
            "application/x-www-form-urlencoded",
            "name=alice&city=paris",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let fields: BTreeMap<String, String> = body_json(resp).await;
    assert_eq!(fields["name"], "alice");
    assert_eq!(fields["city"], "paris");
}

#[tokio::test]
async fn echo_form_accepts_put() {
    let resp = app()
        .oneshot(request(
            "PUT",
            "/echo/form",
            "application/x-www-form-urlencoded",
            "done=true",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let fields: BTreeMap<String, String> = body_json(resp).await;
    assert_eq!(fields["done"], "true");
}

#[tokio::test]
async fn echo_form_rejects_json_content_type() {
    let resp = app()
        .oneshot(request("POST", "/echo/form", "application/json", "{}"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn echo_text_returns_raw_body() {
    let resp = app()
        .oneshot(request("POST", "/echo/text", "text/plain", "raw payload"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "raw payload".as_bytes());
}

#[tokio::test]
async fn echo_json_returns_raw_and_parsed_body() {
    let resp = app()
        .oneshot(request(
            "POST",
            "/echo/json",
            "application/json",
            r#"{"name":"张三"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: JsonEcho = body_json(resp).await;
    assert_eq!(echo.raw, r#"{"name":"张三"}"#);
    assert_eq!(echo.json, json!({ "name": "张三" }));
}

#[tokio::test]
async fn echo_json_rejects_other_content_types() {
    let resp = app()
        .oneshot(request("POST", "/echo/json", "text/plain", "{}"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn echo_json_rejects_invalid_json() {
    let resp = app()
        .oneshot(request("POST", "/echo/json", "application/json", "{oops"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- delete ---

#[tokio::test]
async fn delete_item_returns_id() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/items/42")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["deleted"], "42");
}

#[tokio::test]
async fn delete_missing_item_returns_404() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/items/missing")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
