//! Common test utilities for bank-service integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use bank_service::config::BankConfig;
use bank_service::services::{ClientRepository, SharedRepository};
use bank_service::startup::{build_router, AppState, Application};
use chrono::FixedOffset;
use http_body_util::BodyExt;
use serde_json::Value;
use service_core::config::Config as CommonConfig;
use std::sync::Once;
use tower::util::ServiceExt;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,bank_service=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Router plus a handle on the repository it serves.
pub struct TestRouter {
    pub router: Router,
    pub repository: SharedRepository,
    pub timezone: FixedOffset,
}

impl TestRouter {
    pub fn new() -> Self {
        Self::with_timezone(FixedOffset::east_opt(0).unwrap())
    }

    pub fn with_timezone(timezone: FixedOffset) -> Self {
        init_tracing();
        let repository = ClientRepository::new().shared();
        let router = build_router(AppState::new(repository.clone(), timezone));
        Self {
            router,
            repository,
            timezone,
        }
    }

    /// Send one request and decode the JSON body (`Value::Null` when empty).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    /// Helper to register a client and assert it was accepted.
    pub async fn create_client(&self, tax_id: &str, name: &str) {
        let (status, _) = self
            .post("/account", serde_json::json!({ "taxId": tax_id, "name": name }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "failed to create {}", tax_id);
    }

    /// Helper to read a balance as f64.
    pub async fn balance(&self, tax_id: &str) -> f64 {
        let (status, body) = self.get(&format!("/balance/{}", tax_id)).await;
        assert_eq!(status, StatusCode::OK);
        body.as_f64().expect("balance should be a JSON number")
    }
}

/// Running server bound to a random port.
pub struct TestApp {
    pub address: String,
    pub repository: SharedRepository,
}

impl TestApp {
    pub async fn spawn() -> Self {
        init_tracing();

        let config = BankConfig {
            common: CommonConfig { port: 0 },
            service_name: "bank-service-test".to_string(),
            log_level: "debug".to_string(),
            otlp_endpoint: None,
            utc_offset_minutes: 0,
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build application");

        let address = format!("http://127.0.0.1:{}", app.port());
        let repository = app.repository().clone();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            repository,
        }
    }
}
