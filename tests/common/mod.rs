#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use property_api::{PropertyService, SeaOrmPropertyRepository, database, routes};
use sea_orm::{DatabaseConnection, DbErr};
use serde_json::Value;
use tower::ServiceExt;

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    database::connect("sqlite::memory:").await
}

pub fn setup_test_service(db: DatabaseConnection) -> PropertyService {
    PropertyService::new(Arc::new(SeaOrmPropertyRepository::new(db)))
}

pub fn setup_test_app(db: DatabaseConnection) -> Router {
    routes::router(setup_test_service(db))
}

pub async fn setup() -> Router {
    let db = setup_test_db()
        .await
        .expect("Failed to setup test database");
    setup_test_app(db)
}

/// Send a request and return the status with the decoded JSON body
/// (`Value::Null` for an empty body).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            panic!("Failed to parse JSON '{}': {e}", String::from_utf8_lossy(&bytes))
        })
    };
    (status, json)
}

/// POST a property and return its JSON, panicking unless it was created.
pub async fn create_property(app: &Router, body: Value) -> Value {
    let (status, json) = send(app, "POST", "/properties", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
    json
}

/// GET `/properties?{query}` and return the `data` array.
pub async fn list(app: &Router, query: &str) -> Vec<Value> {
    let uri = if query.is_empty() {
        "/properties".to_string()
    } else {
        format!("/properties?{query}")
    };
    let (status, json) = send(app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK, "list failed for '{query}': {json}");
    json["data"].as_array().cloned().unwrap_or_default()
}

pub fn addresses(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .map(|item| item["address"].as_str().unwrap_or_default().to_string())
        .collect()
}
