//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use todo_cache::api::{create_router, CLIENT_VERSION_HEADER};
use todo_cache::cache::{CacheBackend, MemoryCache};
use todo_cache::policy::StaticPolicy;
use todo_cache::store::SqliteTodoStore;
use todo_cache::{AppState, CacheSettings, Config, TodoCoordinator};

// == Helper Functions ==

fn create_test_app(use_cache: bool) -> Router {
    let cache: Arc<dyn CacheBackend> = Arc::new(MemoryCache::new(100));
    let coordinator = TodoCoordinator::new(
        Arc::new(SqliteTodoStore::memory().unwrap()),
        Arc::clone(&cache),
        Arc::new(StaticPolicy::new(use_cache)),
        CacheSettings::default(),
    );
    create_router(AppState::new(Arc::new(coordinator), cache, "1.1"))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn create(app: &Router, content: &str) -> Value {
    let body = format!(r#"{{"content":"{}","createdBy":"alice","priority":5}}"#, content);
    let (status, json) = send(app, "POST", "/todos", Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED);
    json
}

// == Create ==

#[tokio::test]
async fn test_create_endpoint_success() {
    let app = create_test_app(true);

    let json = create(&app, "buy milk").await;

    assert!(json["id"].as_i64().unwrap() > 0);
    assert_eq!(json["content"], "buy milk");
    assert_eq!(json["status"], "pending");
    assert_eq!(json["createdBy"], "alice");
    assert_eq!(json["priority"], 5);
    assert_eq!(json["createdAt"], json["updatedAt"]);
}

#[tokio::test]
async fn test_create_endpoint_validation() {
    let app = create_test_app(true);

    let (status, json) = send(&app, "POST", "/todos", Some(r#"{"createdBy":"alice"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("content"));

    let (status, _) = send(&app, "POST", "/todos", Some(r#"{"content":"x"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// == Get ==

#[tokio::test]
async fn test_get_endpoint_success() {
    let app = create_test_app(true);
    let created = create(&app, "read me").await;
    let uri = format!("/todos/{}", created["id"]);

    let (status, json) = send(&app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, created);
}

#[tokio::test]
async fn test_get_endpoint_accepts_version_header() {
    let app = create_test_app(false);
    let created = create(&app, "versioned").await;

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/todos/{}?version=0.5", created["id"]))
                .header(CLIENT_VERSION_HEADER, "2.0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app(true);

    let (status, json) = send(&app, "GET", "/todos/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_get_endpoint_bad_id() {
    let app = create_test_app(true);
    let (status, _) = send(&app, "GET", "/todos/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// == List ==

#[tokio::test]
async fn test_list_endpoint() {
    let app = create_test_app(true);
    create(&app, "one").await;
    create(&app, "two").await;

    let (status, json) = send(&app, "GET", "/todos/all", None).await;

    assert_eq!(status, StatusCode::OK);
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["content"], "one");
    assert_eq!(items[1]["content"], "two");
}

#[tokio::test]
async fn test_list_endpoint_empty() {
    let app = create_test_app(true);
    let (status, json) = send(&app, "GET", "/todos/all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, Value::Array(vec![]));
}

// == Update ==

#[tokio::test]
async fn test_update_endpoint_invalidates_cached_item() {
    let app = create_test_app(true);
    let created = create(&app, "draft").await;
    let uri = format!("/todos/{}", created["id"]);

    // populate the item cache
    send(&app, "GET", &uri, None).await;

    let (status, updated) = send(&app, "PUT", &uri, Some(r#"{"content":"final","status":"done"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["content"], "final");
    assert_eq!(updated["status"], "done");
    assert_eq!(updated["priority"], 5);

    let (_, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(fetched["content"], "final");
}

#[tokio::test]
async fn test_update_endpoint_validation_and_not_found() {
    let app = create_test_app(true);
    let created = create(&app, "x").await;
    let uri = format!("/todos/{}", created["id"]);

    let (status, _) = send(&app, "PUT", &uri, Some("{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", "/todos/4242", Some(r#"{"priority":1}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == Delete ==

#[tokio::test]
async fn test_delete_endpoint() {
    let app = create_test_app(true);
    let created = create(&app, "gone soon").await;
    let uri = format!("/todos/{}", created["id"]);
    send(&app, "GET", &uri, None).await;

    let (status, json) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "deleted");
    assert_eq!(json["id"], created["id"]);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == Stats and Health ==

#[tokio::test]
async fn test_stats_endpoint_counts_cache_reads() {
    let app = create_test_app(true);
    let created = create(&app, "counted").await;
    let uri = format!("/todos/{}", created["id"]);

    send(&app, "GET", &uri, None).await; // miss, then populate
    send(&app, "GET", &uri, None).await; // hit

    let (status, json) = send(&app, "GET", "/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["total_entries"], 1);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(true);
    let (status, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

// == Wiring from Config ==

#[tokio::test]
async fn test_state_from_config_with_static_policy() {
    let config = Config {
        database_path: ":memory:".to_string(),
        policy_url: None,
        policy_default_use_cache: true,
        ..Config::default()
    };
    let app = create_router(AppState::from_config(&config, MemoryCache::new(10)).unwrap());

    let created = create(&app, "wired").await;
    let (status, _) = send(&app, "GET", &format!("/todos/{}", created["id"]), None).await;
    assert_eq!(status, StatusCode::OK);
}
