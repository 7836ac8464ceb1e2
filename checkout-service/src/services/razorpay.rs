//! Razorpay payment provider client.
//!
//! Implements the Orders API call used to start a checkout. The client is
//! built once at startup and shared; it owns the only copy of the secret.

use crate::config::RazorpayConfig;
use crate::services::provider::{CreateOrderRequest, PaymentProvider, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use service_core::error::AppError;
use std::time::Duration;

/// Razorpay client for interacting with the Razorpay API.
#[derive(Clone)]
pub struct RazorpayClient {
    client: Client,
    config: RazorpayConfig,
}

impl std::fmt::Debug for RazorpayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayClient")
            .field("key_id", &self.config.key_id)
            .field("api_base_url", &self.config.api_base_url)
            .finish_non_exhaustive()
    }
}

impl RazorpayClient {
    /// Create a new Razorpay client.
    ///
    /// Fails when credentials are missing so a misconfigured process never
    /// reaches the first request.
    pub fn new(config: RazorpayConfig) -> Result<Self, AppError> {
        if !Self::has_credentials(&config) {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "Razorpay credentials not configured"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(concat!("checkout-service/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    fn has_credentials(config: &RazorpayConfig) -> bool {
        !config.key_id.trim().is_empty() && !config.key_secret.expose_secret().trim().is_empty()
    }

    fn orders_url(&self) -> String {
        format!("{}/orders", self.config.api_base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PaymentProvider for RazorpayClient {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<serde_json::Value, ProviderError> {
        let response = self
            .client
            .post(self.orders_url())
            .basic_auth(
                &self.config.key_id,
                Some(self.config.key_secret.expose_secret()),
            )
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = %status, "Razorpay create_order response");

        if status.is_success() {
            let order: serde_json::Value = serde_json::from_str(&body)
                .map_err(|e| ProviderError::Decode(e.to_string()))?;
            tracing::info!(
                order_id = order.get("id").and_then(|v| v.as_str()).unwrap_or("-"),
                amount = request.amount,
                currency = %request.currency,
                receipt = %request.receipt,
                "Razorpay order created"
            );
            Ok(order)
        } else {
            let error = ProviderError::from_response(status.as_u16(), &body);
            tracing::error!(
                status = status.as_u16(),
                code = error.code().unwrap_or("UNKNOWN"),
                body = %body,
                "Razorpay order creation failed"
            );
            Err(error)
        }
    }

    fn key_id(&self) -> &str {
        &self.config.key_id
    }
}
