//! Maintenance request handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use keja_core::domain::{MaintenanceEntry, MaintenanceRequest};

use crate::auth::AuthSession;
use crate::dto::{AdvanceMaintenanceRequest, CreateMaintenanceRequest, ValidatedJson};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/maintenance
pub async fn list_requests(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<Json<ApiResponse<Vec<MaintenanceEntry>>>, ApiError> {
    let requests = state.maintenance.list(&session).await?;
    Ok(Json(ApiResponse::list(requests)))
}

/// POST /api/v1/maintenance
pub async fn create_request(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    ValidatedJson(body): ValidatedJson<CreateMaintenanceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MaintenanceRequest>>), ApiError> {
    let request = state
        .maintenance
        .create(&session, body.unit_id, body.description)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(request))))
}

/// PATCH /api/v1/maintenance/{id}/status
pub async fn advance_request(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<AdvanceMaintenanceRequest>,
) -> Result<Json<ApiResponse<MaintenanceRequest>>, ApiError> {
    let request = state.maintenance.advance(&session, id, body.status).await?;
    Ok(Json(ApiResponse::success(request)))
}
