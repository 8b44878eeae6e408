//! Common test utilities and fixtures
#![allow(dead_code)]

use apparel_core::{MemoryStore, Role, UserId};
use apparel_server::{api, services::AuthService, state::AppState};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key";

/// Test app backed by an in-memory store
pub struct TestApp {
    pub router: Router,
    pub auth_service: Arc<AuthService>,
    pub store: Arc<MemoryStore>,
}

pub fn create_test_app() -> TestApp {
    let store = Arc::new(MemoryStore::default());
    let auth_service = Arc::new(AuthService::new(TEST_SECRET.to_string(), 1));
    let app_state = AppState::new(store.clone(), Arc::clone(&auth_service));

    TestApp {
        router: api::router(app_state),
        auth_service,
        store,
    }
}

impl TestApp {
    /// Signed token for an identity that need not exist in the store
    pub fn token_for(&self, id: &str, role: Role) -> String {
        self.auth_service
            .create_token(&UserId::new(id), role)
            .unwrap()
    }

    /// Send a request and return the status with the parsed JSON body
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap()
        };

        (status, json)
    }
}

/// Test fixtures
pub mod fixtures {
    use serde_json::{json, Value};

    pub const ADMIN_ID: &str = "admin-1";
    pub const VENDOR_ID: &str = "vendor-1";
    pub const OTHER_VENDOR_ID: &str = "vendor-2";
    pub const CUSTOMER_ID: &str = "customer-1";

    pub fn shirt(code: &str, size: &str, quantity: u32, price: f64) -> Value {
        json!({
            "title": "Sample product",
            "description": "Desc",
            "code": code,
            "size": size,
            "quantity": quantity,
            "price": price,
        })
    }
}
