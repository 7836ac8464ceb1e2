//! Payment HTTP handlers.

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        FromRequest, Request, State,
    },
    http::{header, HeaderMap, StatusCode},
    Form, Json,
};
use service_core::error::AppError;

use crate::{
    dtos::{CreatePaymentRequest, CreatePaymentResponse},
    models::AmountError,
    services::{metrics::record_invalid_amount, OrderError},
    AppState,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Liveness probe for the payment routes.
pub async fn payment_test() -> &'static str {
    "Payment route working ✔️"
}

/// Create a provider order for the requested amount.
///
/// Accepts a JSON body, or a urlencoded form when the content type says so.
/// A body that cannot be decoded is treated as an invalid amount; a body
/// that cannot be read at all keeps the status the extractor reported.
pub async fn create_payment(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<CreatePaymentResponse>, AppError> {
    let payload = if is_form(request.headers()) {
        Form::<CreatePaymentRequest>::from_request(request, &state)
            .await
            .map(|Form(payload)| payload)
            .map_err(form_rejection)?
    } else {
        Json::<CreatePaymentRequest>::from_request(request, &state)
            .await
            .map(|Json(payload)| payload)
            .map_err(json_rejection)?
    };

    let created = state.orders.create_order(&payload.amount).await?;

    Ok(Json(created.into()))
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(_)
        | JsonRejection::JsonSyntaxError(_)
        | JsonRejection::MissingJsonContentType(_) => undecodable_body(&rejection.body_text()),
        other => unreadable_body(other.status(), &other.body_text()),
    }
}

fn form_rejection(rejection: FormRejection) -> AppError {
    match rejection {
        FormRejection::BytesRejection(_) => {
            unreadable_body(rejection.status(), &rejection.body_text())
        }
        other => undecodable_body(&other.body_text()),
    }
}

fn undecodable_body(detail: &str) -> AppError {
    tracing::warn!(error = %detail, "Rejected create-payment body");
    record_invalid_amount();
    OrderError::InvalidAmount(AmountError::NotANumber).into()
}

fn unreadable_body(status: StatusCode, detail: &str) -> AppError {
    tracing::warn!(%status, error = %detail, "Could not read create-payment body");
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Request body too large".to_string())
    } else {
        AppError::BadRequest("Invalid request body".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn detects_form_content_type() {
        assert!(is_form(&headers("application/x-www-form-urlencoded")));
        assert!(is_form(&headers("Application/X-WWW-Form-Urlencoded; charset=UTF-8")));
        assert!(!is_form(&headers("application/json")));
        assert!(!is_form(&HeaderMap::new()));
    }

    #[test]
    fn oversized_body_maps_to_413() {
        let err = unreadable_body(StatusCode::PAYLOAD_TOO_LARGE, "length limit exceeded");
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
