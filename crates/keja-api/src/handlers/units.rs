//! Unit handlers: listing, occupy, vacate, delete

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use keja_core::domain::{Tenant, TenantContact, UnitOccupancy};

use crate::auth::AuthSession;
use crate::dto::{UnitsQuery, ValidatedJson};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/units?property_id=
pub async fn list_units(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Query(query): Query<UnitsQuery>,
) -> Result<Json<ApiResponse<Vec<UnitOccupancy>>>, ApiError> {
    let units = state.tenancy.list_units(&session, query.property_id).await?;
    Ok(Json(ApiResponse::list(units).in_currency(&state.config.app.currency)))
}

/// POST /api/v1/units/{id}/occupy
pub async fn occupy_unit(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(unit_id): Path<Uuid>,
    ValidatedJson(contact): ValidatedJson<TenantContact>,
) -> Result<(StatusCode, Json<ApiResponse<Tenant>>), ApiError> {
    let contact = TenantContact::new(&contact.name, &contact.phone).map_err(|e| ApiError::Validation(e.to_string()))?;
    let tenant = state.tenancy.occupy_unit(&session, unit_id, contact).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(tenant))))
}

/// POST /api/v1/units/{id}/vacate
pub async fn vacate_unit(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(unit_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.tenancy.vacate_unit(&session, unit_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/units/{id}
pub async fn delete_unit(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(unit_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.tenancy.delete_unit(&session, unit_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
