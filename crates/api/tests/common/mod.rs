#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use leadbook_api::auth::jwt::{generate_access_token, JwtConfig};
use leadbook_api::config::{ServerConfig, StoreBackend};
use leadbook_api::router::build_app_router;
use leadbook_api::state::AppState;
use leadbook_core::store::MemoryLeadStore;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const TEST_ORIGIN: &str = "http://localhost:3000";

/// Build a test `ServerConfig` with safe defaults and the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![TEST_ORIGIN.to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        database_url: None,
        max_import_bytes: 64 * 1024,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// Clones of the returned router share the same store.
pub fn build_test_app() -> Router {
    let config = test_config();
    let state = AppState {
        store: Arc::new(MemoryLeadStore::new()),
        pool: None,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A valid bearer token for `subject`, signed with the test secret.
pub fn bearer(subject: &str) -> String {
    let token =
        generate_access_token(subject, &test_config().jwt).expect("token generation");
    format!("Bearer {token}")
}

/// A complete, valid apartment lead payload.
pub fn apartment_payload() -> Value {
    json!({
        "full_name": "Asha Verma",
        "email": "asha@example.com",
        "phone": "9876543210",
        "city": "mumbai",
        "property_type": "apartment",
        "bhk": "2bhk",
        "purpose": "buy",
        "budget_min": 5000000,
        "budget_max": 7500000,
        "timeline": "3months",
        "source": "website",
        "notes": "Prefers a high floor",
        "tags": ["urgent", "sea-view"]
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

fn json_request(method: Method, uri: &str, body: &Value, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, None)).await
}

pub async fn post_json_as(app: Router, uri: &str, body: Value, auth: &str) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, Some(auth))).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, &body, None)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::PATCH, uri, &body, None)).await
}

pub async fn patch_json_as(app: Router, uri: &str, body: Value, auth: &str) -> Response<Body> {
    send(app, json_request(Method::PATCH, uri, &body, Some(auth))).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

const BOUNDARY: &str = "leadbook-test-boundary";

/// Upload `contents` as the multipart field `field` with the given file name.
pub async fn upload(
    app: Router,
    uri: &str,
    field: &str,
    file_name: &str,
    contents: &[u8],
) -> Response<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: text/csv\r\n\r\n");
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).expect("body should be UTF-8")
}

/// Create a lead and return its id, asserting the 201.
pub async fn create_lead(app: Router, payload: Value) -> i64 {
    let response = post_json(app, "/api/v1/buyers", payload).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("created lead has an id")
}
