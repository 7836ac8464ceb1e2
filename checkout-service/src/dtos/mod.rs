use crate::models::RawAmount;
use crate::services::CreatedOrder;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/payment/create-payment`.
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    /// Rupees, as a JSON number or numeric string.
    #[serde(default)]
    pub amount: RawAmount,
}

#[derive(Debug, Serialize)]
pub struct CreatePaymentResponse {
    pub success: bool,
    pub order: serde_json::Value,
    pub key: String,
}

impl From<CreatedOrder> for CreatePaymentResponse {
    fn from(created: CreatedOrder) -> Self {
        Self {
            success: true,
            order: created.order,
            key: created.key,
        }
    }
}
