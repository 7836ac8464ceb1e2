#![allow(dead_code)]

use axum::{body::Body, http::Response, Router};
use checkout_service::config::{
    Config, CorsSettings, PaymentSettings, RazorpayConfig, DEFAULT_ALLOWED_ORIGINS,
};
use checkout_service::services::PaymentProvider;
use checkout_service::{build_router, AppState, Application};
use secrecy::Secret;
use service_core::config::{ServerSettings, TelemetrySettings};
use std::sync::Arc;

pub const TEST_KEY_ID: &str = "rzp_test_key";
pub const TEST_KEY_SECRET: &str = "test_secret";

pub fn test_config(api_base_url: &str) -> Config {
    Config {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port
            body_limit_bytes: 1024 * 1024,
        },
        telemetry: TelemetrySettings {
            log_level: "debug".to_string(),
            json: false,
            otlp_endpoint: None,
        },
        razorpay: RazorpayConfig {
            key_id: TEST_KEY_ID.to_string(),
            key_secret: Secret::new(TEST_KEY_SECRET.to_string()),
            api_base_url: api_base_url.to_string(),
            timeout_secs: 2,
            connect_timeout_secs: 1,
        },
        payment: PaymentSettings {
            receipt_prefix: "VTL".to_string(),
        },
        cors: CorsSettings {
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        },
        service_name: "checkout-service-test".to_string(),
    }
}

/// Router backed by the given provider, without a metrics recorder.
pub fn router_with(provider: Arc<dyn PaymentProvider>) -> Router {
    let state = AppState::new(test_config("http://unused.invalid"), provider, None);
    build_router(state)
}

pub async fn read_body(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec()
}

pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&read_body(response).await).expect("Failed to parse JSON")
}

/// A running server bound to a random local port.
pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn(api_base_url: &str) -> Self {
        let app = Application::build(test_config(api_base_url))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        Self {
            address: format!("http://127.0.0.1:{}", port),
            port,
        }
    }
}
