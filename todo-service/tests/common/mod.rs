//! Test helpers driving the todo router in-process.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use todo_service::{
    build_router,
    config::{MongoConfig, StoreBackend, TodoConfig},
    services::{DisconnectedStore, MemoryTodoStore, TodoStore},
    AppState,
};
use tower::ServiceExt;

pub fn test_config(store: StoreBackend) -> TodoConfig {
    TodoConfig {
        common: CoreConfig {
            port: 0,
            log_level: "debug".to_string(),
            service_name: "todo-service-test".to_string(),
        },
        mongodb: MongoConfig {
            uri: None,
            database: "todo_test".to_string(),
        },
        store,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
    pub content_type: Option<String>,
    pub headers: HeaderMap,
}

pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// Router backed by a fresh in-memory store.
    pub fn spawn() -> Self {
        Self::with_store(Arc::new(MemoryTodoStore::new()))
    }

    /// Router whose store always reports itself unreachable.
    pub fn disconnected() -> Self {
        Self::with_store(Arc::new(DisconnectedStore::new(
            "Server selection timeout: No available servers",
        )))
    }

    pub fn with_store(store: Arc<dyn TodoStore>) -> Self {
        let state = AppState {
            config: test_config(StoreBackend::Memory),
            store,
        };
        Self {
            router: build_router(state),
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let text = String::from_utf8_lossy(&bytes).to_string();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            text,
            content_type,
            headers,
        }
    }

    pub async fn create(&self, title: &str, description: Option<&str>) -> Value {
        let mut payload = serde_json::json!({ "title": title });
        if let Some(description) = description {
            payload["description"] = Value::from(description);
        }
        let response = self.request("POST", "/do-backend", Some(payload)).await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body
    }

    pub async fn list(&self) -> Vec<Value> {
        let response = self.request("GET", "/do-backend", None).await;
        assert_eq!(response.status, StatusCode::OK);
        response
            .body
            .as_array()
            .expect("list body is an array")
            .clone()
    }
}
