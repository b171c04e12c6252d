//! Payment handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use keja_core::domain::{Money, PaymentEntry};
use keja_core::repositories::RecordedPayment;
use keja_core::services::Receipt;

use crate::auth::AuthSession;
use crate::dto::{RecordPaymentRequest, ValidatedJson};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/payments
pub async fn list_payments(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<Json<ApiResponse<Vec<PaymentEntry>>>, ApiError> {
    let history = state.payments.history(&session).await?;
    Ok(Json(ApiResponse::list(history).in_currency(&state.config.app.currency)))
}

/// POST /api/v1/payments
pub async fn record_payment(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    ValidatedJson(body): ValidatedJson<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RecordedPayment>>), ApiError> {
    let method = body.method()?;
    let recorded = state
        .payments
        .record_payment(&session, body.tenant_id, Money::new(body.amount), method, body.payment_date)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(recorded).in_currency(&state.config.app.currency)),
    ))
}

/// GET /api/v1/payments/{id}/receipt
pub async fn payment_receipt(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(payment_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Receipt>>, ApiError> {
    let receipt = state.payments.receipt(&session, payment_id).await?;
    Ok(Json(ApiResponse::success(receipt)))
}
