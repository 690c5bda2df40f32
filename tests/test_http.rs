mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use common::{setup_unavailable, FailingProvider};
use memory_api::api::router;
use memory_api::config::DEFAULT_CORS_ORIGINS;
use memory_api::infrastructure::embeddings::hashing::HashingProvider;
use memory_api::MemoryApi;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn origins() -> Vec<String> {
    DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect()
}

fn app(dir: &tempfile::TempDir) -> Router {
    let api = MemoryApi::with_providers(
        Arc::new(HashingProvider::default()),
        dir.path().join("memories.leann"),
    );
    router(Arc::new(api), &origins())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_status_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "service": "Memory API",
            "status": "running",
            "leann_available": true,
            "total_memories": 0
        })
    );
}

#[tokio::test]
async fn test_add_search_list_clear_flow() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let (status, body) = send(
        &app,
        "POST",
        "/memory/add",
        Some(json!({ "id": "a", "text": "cats are great pets", "title": "Cats", "tags": ["Pets"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "memory_id": "a", "total_memories": 1 }));

    let (status, body) = send(
        &app,
        "POST",
        "/memory/bulk-add",
        Some(json!({ "memories": [
            { "id": "b", "text": "dogs are loyal pets" },
            { "id": "c", "text": "stock markets fell today" }
        ] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "added": 2, "total_memories": 3 }));

    let (status, body) = send(
        &app,
        "POST",
        "/memory/search",
        Some(json!({ "memory_id": "a", "k": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["related_ids"], json!(["b", "c"]));
    assert_eq!(body["scores"].as_array().unwrap().len(), 2);

    // k defaults to 5; only two other memories exist.
    let (_, body) = send(&app, "POST", "/memory/search", Some(json!({ "memory_id": "c" }))).await;
    assert_eq!(body["related_ids"].as_array().unwrap().len(), 2);

    let (status, body) = send(&app, "GET", "/memory/list", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "memory_ids": ["a", "b", "c"], "total": 3 }));

    let (status, body) = send(&app, "DELETE", "/memory/clear", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true, "message": "All memories cleared" }));

    let (status, body) = send(&app, "GET", "/memory/list", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "memory_ids": [], "total": 0 }));
}

#[tokio::test]
async fn test_search_unknown_id_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let (status, body) = send(
        &app,
        "POST",
        "/memory/search",
        Some(json!({ "memory_id": "ghost", "k": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Memory ghost not found");
}

#[tokio::test]
async fn test_unavailable_returns_503_for_index_operations() {
    let t = setup_unavailable();
    let app = router(Arc::new(t.api), &origins());

    for (uri, body) in [
        ("/memory/add", json!({ "id": "a", "text": "t" })),
        ("/memory/bulk-add", json!({ "memories": [{ "id": "a", "text": "t" }] })),
        ("/memory/search", json!({ "memory_id": "a" })),
    ] {
        let (status, body) = send(&app, "POST", uri, Some(body)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{uri}");
        assert!(body["detail"].as_str().unwrap().contains("not available"));
    }

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["leann_available"], false);

    assert_eq!(send(&app, "GET", "/memory/list", None).await.0, StatusCode::OK);
    assert_eq!(send(&app, "DELETE", "/memory/clear", None).await.0, StatusCode::OK);
}

#[tokio::test]
async fn test_rebuild_error_is_500_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let api = MemoryApi::with_providers(Arc::new(FailingProvider), dir.path().join("memories.leann"));
    let app = router(Arc::new(api), &origins());

    let (status, body) = send(
        &app,
        "POST",
        "/memory/add",
        Some(json!({ "id": "a", "text": "t" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("provider offline"));
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let (status, body) = send(&app, "POST", "/memory/add", Some(json!({ "id": "a" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("missing field `text`"));

    let (status, body) = send(
        &app,
        "POST",
        "/memory/search",
        Some(json!({ "memory_id": "a", "k": -1 })),
    )
    .await;
    assert!(status.is_client_error());
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_missing_content_type_uses_detail_body() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let request = Request::builder()
        .method("POST")
        .uri("/memory/bulk-add")
        .body(Body::from(r#"{"memories":[]}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_cors_preflight_allows_dev_origins_with_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let preflight = |origin: &str| {
        Request::builder()
            .method("OPTIONS")
            .uri("/memory/add")
            .header("Origin", origin)
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type")
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(preflight("http://localhost:5173")).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "http://localhost:5173");
    assert_eq!(headers["access-control-allow-credentials"], "true");

    let response = app.oneshot(preflight("http://evil.example")).await.unwrap();
    assert!(response.headers().get("access-control-allow-origin").is_none());
}
