//! Payment provider abstraction.
//!
//! The order service only needs "create an order and give me back whatever
//! the provider returned". Keeping that behind a trait lets the Razorpay
//! client be swapped for a mock in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned to clients when the provider gives nothing usable.
pub const GENERIC_PROVIDER_FAILURE: &str = "Payment order creation failed";

/// Order creation parameters sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateOrderRequest {
    /// Amount in the smallest currency unit (paise for INR).
    pub amount: u64,
    /// ISO currency code.
    pub currency: String,
    /// Correlation reference, see [`crate::models::Receipt`].
    pub receipt: String,
}

/// Structured error body returned by Razorpay:
/// `{ "error": { "code": ..., "description": ..., ... } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RazorpayErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub step: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorBody {
    error: RazorpayErrorDetail,
}

/// Error type for provider operations.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status.
    #[error("provider returned HTTP {status}")]
    Api {
        status: u16,
        detail: Option<RazorpayErrorDetail>,
        message: Option<String>,
    },

    #[error("provider request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected provider response: {0}")]
    Decode(String),

    /// The provider call itself failed to complete (panicked or was aborted).
    #[error("provider call did not complete: {0}")]
    Internal(String),
}

impl ProviderError {
    /// Build an error from a non-success HTTP response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<RazorpayErrorBody>(body) {
            Ok(parsed) => ProviderError::Api {
                status,
                detail: Some(parsed.error),
                message: None,
            },
            Err(_) => ProviderError::Api {
                status,
                detail: None,
                message: Some(format!("Payment provider returned HTTP {}", status)),
            },
        }
    }

    /// Structured, provider-authored description, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            ProviderError::Api {
                detail: Some(detail),
                ..
            } => non_blank(detail.description.as_deref()),
            _ => None,
        }
    }

    /// Generic, caller-safe message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ProviderError::Api { message, .. } => non_blank(message.as_deref()),
            ProviderError::Timeout => Some("Payment provider timed out"),
            ProviderError::Network(_) => Some("Unable to reach payment provider"),
            ProviderError::Decode(_) => Some("Unexpected response from payment provider"),
            ProviderError::Internal(_) => None,
        }
    }

    /// Message for the client: description, then message, then a fixed string.
    pub fn user_message(&self) -> &str {
        self.description()
            .or_else(|| self.message())
            .unwrap_or(GENERIC_PROVIDER_FAILURE)
    }

    /// Provider error code (`BAD_REQUEST_ERROR`, ...), if reported.
    pub fn code(&self) -> Option<&str> {
        match self {
            ProviderError::Api {
                detail: Some(detail),
                ..
            } => detail.code.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether retrying the same request later could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Timeout | ProviderError::Network(_) => true,
            ProviderError::Api { status, .. } => *status == 429 || *status >= 500,
            ProviderError::Decode(_) | ProviderError::Internal(_) => false,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// A payment provider that can create payable orders.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create an order. The provider's order object is returned verbatim.
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<serde_json::Value, ProviderError>;

    /// Public (non-secret) key the browser checkout needs.
    fn key_id(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_structured_description() {
        let err = ProviderError::from_response(
            400,
            r#"{"error":{"code":"BAD_REQUEST_ERROR","description":"Insufficient funds","source":"business","step":"payment_initiation","reason":"insufficient_balance","field":null}}"#,
        );

        assert_eq!(err.user_message(), "Insufficient funds");
        assert_eq!(err.code(), Some("BAD_REQUEST_ERROR"));
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn falls_back_to_message_for_unstructured_body() {
        let err = ProviderError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.user_message(), "Payment provider returned HTTP 502");
        assert!(err.is_retryable());
    }

    #[test]
    fn blank_description_falls_through() {
        let err = ProviderError::Api {
            status: 400,
            detail: Some(RazorpayErrorDetail {
                description: Some("   ".to_string()),
                ..Default::default()
            }),
            message: Some("boom".to_string()),
        };
        assert_eq!(err.user_message(), "boom");
    }

    #[test]
    fn falls_back_to_generic_string() {
        let err = ProviderError::Api {
            status: 500,
            detail: None,
            message: None,
        };
        assert_eq!(err.user_message(), GENERIC_PROVIDER_FAILURE);

        let err = ProviderError::Internal("task panicked".to_string());
        assert_eq!(err.user_message(), GENERIC_PROVIDER_FAILURE);
    }

    #[test]
    fn network_details_stay_out_of_user_message() {
        let err = ProviderError::Network(
            "error sending request for url (https://api.razorpay.com/v1/orders)".to_string(),
        );
        assert_eq!(err.user_message(), "Unable to reach payment provider");
    }

    #[test]
    fn classifies_retryable_failures() {
        assert!(ProviderError::Timeout.is_retryable());
        assert!(ProviderError::from_response(429, "{}").is_retryable());
        assert!(!ProviderError::from_response(401, "{}").is_retryable());
        assert!(!ProviderError::Decode("bad json".into()).is_retryable());
    }
}
