//! Payment-order creation.
//!
//! Validates the requested amount, converts it to paise, stamps a receipt
//! and asks the provider for an order. Invalid input never reaches the
//! provider; every valid request makes exactly one provider call.

use crate::models::{Amount, AmountError, RawAmount, Receipt};
use crate::services::metrics::{record_invalid_amount, record_order_created, record_order_failed};
use crate::services::provider::{CreateOrderRequest, PaymentProvider, ProviderError};
use service_core::error::AppError;
use std::sync::Arc;
use thiserror::Error;
use tracing::Instrument;

/// The only currency orders are created in.
pub const CURRENCY: &str = "INR";

/// Client-facing message for rejected amounts.
pub const INVALID_AMOUNT_MESSAGE: &str = "Invalid amount";

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error("payment provider failure: {0}")]
    ProviderFailure(#[from] ProviderError),
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::InvalidAmount(_) => AppError::BadRequest(INVALID_AMOUNT_MESSAGE.to_string()),
            OrderError::ProviderFailure(e) => AppError::ExternalService(e.user_message().to_string()),
        }
    }
}

/// A created provider order plus what the browser needs to pay it.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedOrder {
    /// Provider order object, untouched.
    pub order: serde_json::Value,
    /// Public key id for the client-side checkout.
    pub key: String,
}

#[derive(Clone)]
pub struct OrderService {
    provider: Arc<dyn PaymentProvider>,
    receipt_prefix: String,
}

impl OrderService {
    pub fn new(provider: Arc<dyn PaymentProvider>, receipt_prefix: impl Into<String>) -> Self {
        Self {
            provider,
            receipt_prefix: receipt_prefix.into(),
        }
    }

    /// Create a provider order for `raw` rupees.
    ///
    /// The provider call runs on its own task and is not cancelled when the
    /// caller goes away; its outcome is logged either way.
    pub async fn create_order(&self, raw: &RawAmount) -> Result<CreatedOrder, OrderError> {
        let amount = Amount::parse(raw).map_err(|e| {
            tracing::warn!(reason = %e, "Rejected payment amount");
            record_invalid_amount();
            e
        })?;
        let minor = amount.to_minor();
        let receipt = Receipt::now(&self.receipt_prefix);

        let request = CreateOrderRequest {
            amount: minor.value(),
            currency: CURRENCY.to_string(),
            receipt: receipt.into(),
        };

        tracing::info!(
            amount = amount.major(),
            amount_minor = request.amount,
            receipt = %request.receipt,
            "Creating payment order"
        );

        let provider = Arc::clone(&self.provider);
        let call = tokio::spawn(
            async move {
                let result = provider.create_order(&request).await;
                match &result {
                    Ok(_) => {
                        tracing::info!(receipt = %request.receipt, "Payment order created");
                        record_order_created(&request.currency, request.amount);
                    }
                    Err(e) => {
                        tracing::error!(
                            error = %e,
                            status = ?e.status(),
                            code = e.code().unwrap_or("-"),
                            retryable = e.is_retryable(),
                            receipt = %request.receipt,
                            "Payment order creation failed"
                        );
                        record_order_failed(&request.currency, e.is_retryable());
                    }
                }
                result
            }
            .instrument(tracing::Span::current()),
        );

        let order = call
            .await
            .map_err(|e| ProviderError::Internal(e.to_string()))??;

        Ok(CreatedOrder {
            order,
            key: self.provider.key_id().to_string(),
        })
    }
}
