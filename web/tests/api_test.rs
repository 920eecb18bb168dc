//! HTTP API integration tests.
//!
//! Drives the full router with in-process requests: routing, JSON
//! contract, and status codes for every inventory outcome.
//!
//! Run with: `cargo test --test api_test`

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use atelier_store::{InventoryService, StoreRepository};
use atelier_web::{AppState, build_router};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn seed() -> serde_json::Value {
    serde_json::json!({
        "products_en": [
            {
                "id": "urban-portrait-7",
                "title": "Urban Portrait #7",
                "sold": false,
                "inventory_quantity": 1,
                "price": 1800,
                "currency": "CAD"
            }
        ],
        "products_fr": [
            {
                "id": "urban-portrait-7",
                "title": "Portrait urbain #7",
                "sold": false,
                "inventory_quantity": 1,
                "price": 1800,
                "currency": "CAD"
            }
        ],
        "shipping_info_en": {"free_shipping_threshold": 500}
    })
}

struct Fixture {
    // Held so the scratch directory outlives the router.
    _dir: TempDir,
    path: PathBuf,
    state: AppState,
}

fn setup(data: &serde_json::Value) -> Fixture {
    let dir = tempfile::tempdir().expect("scratch dir");
    let path = dir.path().join("store.json");
    std::fs::write(&path, serde_json::to_vec_pretty(data).unwrap()).unwrap();

    let repository = Arc::new(StoreRepository::new());
    let inventory = Arc::new(InventoryService::new(Arc::clone(&repository), path.clone()));
    Fixture {
        _dir: dir,
        path,
        state: AppState::new(repository, inventory),
    }
}

fn router(fixture: &Fixture) -> Router {
    build_router(fixture.state.clone())
}

async fn post_json(
    router: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn sale_returns_mutated_product() {
    let fixture = setup(&seed());

    let (status, body) = post_json(
        router(&fixture),
        "/api/store/inventory",
        &serde_json::json!({"id": "urban-portrait-7", "payment_event_id": "evt_123"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], serde_json::json!(true));
    assert_eq!(body["message"], "Inventory updated successfully");
    assert_eq!(body["product"]["sold"], serde_json::json!(true));
    assert_eq!(body["product"]["inventory_quantity"], serde_json::json!(0));
    assert_eq!(body["product"]["sales"], serde_json::json!(["evt_123"]));
}

#[tokio::test]
async fn unknown_product_reports_not_found() {
    let fixture = setup(&seed());

    let (status, body) = post_json(
        router(&fixture),
        "/api/store/inventory",
        &serde_json::json!({"id": "non-existent-id"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], serde_json::json!(false));
    assert_eq!(body["message"], "Product not found");
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("non-existent-id")
    );
    assert!(body.get("product").is_none());
}

#[tokio::test]
async fn sold_out_product_reports_already_sold() {
    let fixture = setup(&seed());

    let first = post_json(
        router(&fixture),
        "/api/store/inventory",
        &serde_json::json!({"id": "urban-portrait-7"}),
    )
    .await;
    assert_eq!(first.0, StatusCode::OK);

    let (status, body) = post_json(
        router(&fixture),
        "/api/store/inventory",
        &serde_json::json!({"id": "urban-portrait-7", "payment_event_id": "evt_retry"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Product already sold");
    // The rejected product is echoed back unmodified.
    assert_eq!(body["product"]["inventory_quantity"], serde_json::json!(0));
}

#[tokio::test]
async fn storage_fault_reports_update_failure() {
    let dir = tempfile::tempdir().unwrap();
    let repository = Arc::new(StoreRepository::new());
    let inventory = Arc::new(InventoryService::new(
        Arc::clone(&repository),
        dir.path().join("absent.json"),
    ));
    let app = build_router(AppState::new(repository, inventory));

    let (status, body) = post_json(
        app,
        "/api/store/inventory",
        &serde_json::json!({"id": "urban-portrait-7"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to update inventory");
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn blank_id_is_rejected() {
    let fixture = setup(&seed());

    let (status, body) = post_json(
        router(&fixture),
        "/api/store/inventory",
        &serde_json::json!({"id": "  "}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn get_store_returns_catalog_with_passthrough_keys() {
    let fixture = setup(&seed());

    let (status, body) = get(router(&fixture), "/api/store").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products_en"][0]["id"], "urban-portrait-7");
    assert_eq!(body["products_fr"][0]["title"], "Portrait urbain #7");
    assert_eq!(
        body["shipping_info_en"]["free_shipping_threshold"],
        serde_json::json!(500)
    );
}

#[tokio::test]
async fn reload_drops_cache_after_external_edit() {
    let fixture = setup(&seed());

    // Prime the cache.
    let (status, _) = get(router(&fixture), "/api/store").await;
    assert_eq!(status, StatusCode::OK);

    // Restock behind the cache.
    std::fs::write(
        &fixture.path,
        serde_json::to_vec_pretty(&serde_json::json!({
            "products_en": [
                {"id": "urban-portrait-7", "sold": false, "inventory_quantity": 9}
            ],
            "products_fr": []
        }))
        .unwrap(),
    )
    .unwrap();

    // Cached value still served...
    let (_, stale) = get(router(&fixture), "/api/store").await;
    assert_eq!(
        stale["products_en"][0]["inventory_quantity"],
        serde_json::json!(1)
    );

    // ...until a reload.
    let (status, body) = post_json(
        router(&fixture),
        "/api/store/reload",
        &serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Store cache cleared");

    let (_, fresh) = get(router(&fixture), "/api/store").await;
    assert_eq!(
        fresh["products_en"][0]["inventory_quantity"],
        serde_json::json!(9)
    );
}

#[tokio::test]
async fn health_and_readiness_report_status() {
    let fixture = setup(&seed());

    let (status, body) = get(router(&fixture), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(router(&fixture), "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], serde_json::json!(true));
}

#[tokio::test]
async fn readiness_fails_without_data_file() {
    let dir = tempfile::tempdir().unwrap();
    let repository = Arc::new(StoreRepository::new());
    let inventory = Arc::new(InventoryService::new(
        Arc::clone(&repository),
        dir.path().join("absent.json"),
    ));
    let app = build_router(AppState::new(repository, inventory));

    let (status, body) = get(app, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["ready"], serde_json::json!(false));
}
