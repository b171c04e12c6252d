//! Property handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use keja_core::domain::{Property, PropertyDraft};
use keja_core::services::PropertyOverview;

use crate::auth::AuthSession;
use crate::dto::{UpdatePropertyRequest, ValidatedJson};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/properties
pub async fn list_properties(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<Json<ApiResponse<Vec<PropertyOverview>>>, ApiError> {
    let properties = state.properties.list_with_stats(&session).await?;
    Ok(Json(ApiResponse::list(properties).in_currency(&state.config.app.currency)))
}

/// POST /api/v1/properties
pub async fn create_property(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    ValidatedJson(draft): ValidatedJson<PropertyDraft>,
) -> Result<(StatusCode, Json<ApiResponse<PropertyOverview>>), ApiError> {
    let created = state.properties.create_property(&session, draft).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created))))
}

/// GET /api/v1/properties/{id}
pub async fn get_property(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PropertyOverview>>, ApiError> {
    let property = state.properties.get_property(&session, id).await?;
    Ok(Json(ApiResponse::success(property)))
}

/// PUT /api/v1/properties/{id}
pub async fn update_property(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdatePropertyRequest>,
) -> Result<Json<ApiResponse<Property>>, ApiError> {
    let property = state
        .properties
        .update_property(&session, id, body.name, body.location)
        .await?;
    Ok(Json(ApiResponse::success(property)))
}
