use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request},
    response::Response,
};
use serde_json::Value;

use shared_config::{AppConfig, TokenPolicy};

pub struct TestConfig {
    pub token_policy: TokenPolicy,
    pub urgent_threshold: i32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            token_policy: TokenPolicy::Urgency,
            urgent_threshold: 80,
        }
    }
}

impl TestConfig {
    pub fn sequential() -> Self {
        Self {
            token_policy: TokenPolicy::Sequential,
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            token_policy: self.token_policy,
            urgent_threshold: self.urgent_threshold,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Builds a request with an optional JSON body for router tests.
pub fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);

    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("test request should be valid")
}

pub async fn read_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
