//! Tenant directory handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use keja_core::domain::{Tenant, TenantContact, TenantRecord};
use keja_core::services::{TenantFilter, TenantSummary};

use crate::auth::AuthSession;
use crate::dto::{LedgerView, TenantsQuery, ValidatedJson};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct TenantRow {
    #[serde(flatten)]
    pub record: TenantRecord,
    pub ledger: LedgerView,
}

impl From<TenantSummary> for TenantRow {
    fn from(summary: TenantSummary) -> Self {
        Self {
            ledger: LedgerView::from(&summary.ledger),
            record: summary.record,
        }
    }
}

/// GET /api/v1/tenants?property_id=&q=
pub async fn list_tenants(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Query(query): Query<TenantsQuery>,
) -> Result<Json<ApiResponse<Vec<TenantRow>>>, ApiError> {
    let filter = TenantFilter {
        property_id: query.property_id,
        query: query.q,
    };
    let tenants = state.tenancy.list_tenants(&session, &filter).await?;
    let rows: Vec<TenantRow> = tenants.into_iter().map(TenantRow::from).collect();
    Ok(Json(ApiResponse::list(rows).in_currency(&state.config.app.currency)))
}

/// PUT /api/v1/tenants/{id}
pub async fn update_tenant(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(tenant_id): Path<Uuid>,
    ValidatedJson(contact): ValidatedJson<TenantContact>,
) -> Result<Json<ApiResponse<Tenant>>, ApiError> {
    let contact = TenantContact::new(&contact.name, &contact.phone).map_err(|e| ApiError::Validation(e.to_string()))?;
    let tenant = state.tenancy.update_tenant(&session, tenant_id, contact).await?;
    Ok(Json(ApiResponse::success(tenant)))
}

/// GET /api/v1/tenants/{id}/ledger
pub async fn tenant_ledger(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(tenant_id): Path<Uuid>,
) -> Result<Json<ApiResponse<LedgerView>>, ApiError> {
    let ledger = state.payments.tenant_ledger(&session, tenant_id).await?;
    Ok(Json(ApiResponse::success(LedgerView::from(&ledger)).in_currency(&state.config.app.currency)))
}
