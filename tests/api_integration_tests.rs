//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use resilient_access::{
    api::create_router,
    cache::{CacheConfig, SharedCache},
    catalog::{InMemoryBackend, MaterialService},
    AppState, CacheAside, RetryOrchestrator, RetryPolicy,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> (Router, Arc<InMemoryBackend>) {
    let backend = Arc::new(InMemoryBackend::seeded());
    let policy =
        RetryPolicy::new(2, Duration::from_millis(5), 2.0, Duration::from_millis(20)).unwrap();
    let service = MaterialService::new(
        backend.clone(),
        CacheAside::new(SharedCache::from_config(CacheConfig::default()).unwrap()),
        CacheAside::new(SharedCache::from_config(CacheConfig::default()).unwrap()),
        RetryOrchestrator::new(policy),
    );
    (create_router(AppState::new(service)), backend)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn send(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// == GET /materials/:id ==

#[tokio::test]
async fn test_get_material_success() {
    let (app, _) = create_test_app();

    let response = app.oneshot(get("/materials/mat-001")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["id"], "mat-001");
    assert_eq!(json["name"], "Carrara Marble");
}

#[tokio::test]
async fn test_get_material_served_from_cache() {
    let (app, backend) = create_test_app();

    for _ in 0..3 {
        let response = app.clone().oneshot(get("/materials/mat-002")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(backend.calls(), 1);

    let response = app.oneshot(get("/stats")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["records"]["hits"], 2);
    assert_eq!(json["records"]["misses"], 1);
    assert_eq!(json["records"]["total_entries"], 1);
}

#[tokio::test]
async fn test_get_material_not_found() {
    let (app, backend) = create_test_app();

    let response = app.oneshot(get("/materials/mat-404")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["kind"], "not_found");
    assert!(json["error"].as_str().unwrap().contains("get_material"));
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_transient_failure_recovered() {
    let (app, backend) = create_test_app();
    backend.fail_next(2);

    let response = app.oneshot(get("/materials/mat-003")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(backend.calls(), 3);
}

#[tokio::test]
async fn test_persistent_failure_is_service_unavailable() {
    let (app, backend) = create_test_app();
    backend.fail_next(10);

    let response = app.oneshot(get("/materials/mat-003")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["kind"], "network");
    assert_eq!(backend.calls(), 3);
}

// == GET /materials ==

#[tokio::test]
async fn test_list_materials_by_category() {
    let (app, _) = create_test_app();

    let response = app.oneshot(get("/materials?category=stone")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["materials"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_materials_unfiltered() {
    let (app, _) = create_test_app();

    let response = app.oneshot(get("/materials")).await.unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 4);
}

// == POST /materials ==

#[tokio::test]
async fn test_create_material_refreshes_listing() {
    let (app, _) = create_test_app();

    let response = app.clone().oneshot(get("/materials?category=wood")).await.unwrap();
    assert_eq!(body_to_json(response.into_body()).await["count"], 1);

    let response = app
        .clone()
        .oneshot(send(
            "POST",
            "/materials",
            r#"{"id":"mat-020","name":"Smoked Walnut","category":"wood","finish":"oiled"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["finish"], "oiled");

    let response = app.oneshot(get("/materials?category=wood")).await.unwrap();
    assert_eq!(body_to_json(response.into_body()).await["count"], 2);
}

#[tokio::test]
async fn test_create_duplicate_is_conflict() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(send(
            "POST",
            "/materials",
            r#"{"id":"mat-001","name":"Again","category":"stone"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["kind"], "conflict");
}

#[tokio::test]
async fn test_create_empty_id_rejected() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(send(
            "POST",
            "/materials",
            r#"{"id":"","name":"Nameless","category":"stone"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["kind"], "invalid_request");
}

#[tokio::test]
async fn test_invalid_json_request() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(send("POST", "/materials", "not valid json"))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// == Stats and cache administration ==

#[tokio::test]
async fn test_stats_reset() {
    let (app, _) = create_test_app();

    app.clone().oneshot(get("/materials/mat-001")).await.unwrap();
    app.clone().oneshot(get("/materials/mat-001")).await.unwrap();

    let response = app
        .oneshot(send("POST", "/stats/reset", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["records"]["hits"], 0);
    assert_eq!(json["records"]["misses"], 0);
    assert_eq!(json["records"]["hit_rate"], 0.0);
    assert_eq!(json["records"]["total_entries"], 1);
}

#[tokio::test]
async fn test_invalidate_namespace_forces_refetch() {
    let (app, backend) = create_test_app();

    app.clone().oneshot(get("/materials/mat-004")).await.unwrap();
    app.clone().oneshot(get("/materials")).await.unwrap();

    let response = app
        .clone()
        .oneshot(send("DELETE", "/cache/materials", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["removed"], 2);

    app.oneshot(get("/materials/mat-004")).await.unwrap();
    assert_eq!(backend.calls(), 3);
}

#[tokio::test]
async fn test_invalidate_unknown_namespace_removes_nothing() {
    let (app, _) = create_test_app();

    app.clone().oneshot(get("/materials/mat-004")).await.unwrap();
    let response = app
        .oneshot(send("DELETE", "/cache/finishes", ""))
        .await
        .unwrap();

    assert_eq!(body_to_json(response.into_body()).await["removed"], 0);
}

#[tokio::test]
async fn test_clear_cache() {
    let (app, _) = create_test_app();

    app.clone().oneshot(get("/materials/mat-001")).await.unwrap();
    app.clone().oneshot(get("/materials/mat-002")).await.unwrap();

    let response = app
        .clone()
        .oneshot(send("DELETE", "/cache", ""))
        .await
        .unwrap();
    assert_eq!(body_to_json(response.into_body()).await["removed"], 2);

    let response = app.oneshot(get("/stats")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["records"]["total_entries"], 0);
}

// == GET /health ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = create_test_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}
