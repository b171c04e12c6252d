// ============================================================================
// Keja API - Report Handlers
// File: crates/keja-api/src/handlers/reports.rs
// Description: Dashboard, summary, monthly and debtor reports, CSV downloads
// ============================================================================

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use keja_core::reports::DashboardStats;
use keja_shared::constants::{ARREARS_REPORT_FILENAME, MONTHLY_REPORT_FILENAME, TOP_DEBTORS_LIMIT};

use crate::auth::AuthSession;
use crate::dto::{DebtorView, MonthlyView, SummaryView, TopDebtorsQuery};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    let stats = state.reports.dashboard(&session).await?;
    Ok(Json(ApiResponse::success(stats).in_currency(&state.config.app.currency)))
}

/// GET /api/v1/reports/summary
pub async fn summary(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<Json<ApiResponse<SummaryView>>, ApiError> {
    let summary = state.reports.summary(&session).await?;
    Ok(Json(ApiResponse::success(SummaryView::new(&summary, &state.config.app.currency))))
}

/// GET /api/v1/reports/monthly
pub async fn monthly(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<Json<ApiResponse<Vec<MonthlyView>>>, ApiError> {
    let rows = state.reports.monthly(&session).await?;
    let rows: Vec<MonthlyView> = rows.iter().map(MonthlyView::from).collect();
    Ok(Json(ApiResponse::list(rows).in_currency(&state.config.app.currency)))
}

/// GET /api/v1/reports/top-debtors?limit=
pub async fn top_debtors(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Query(query): Query<TopDebtorsQuery>,
) -> Result<Json<ApiResponse<Vec<DebtorView>>>, ApiError> {
    let limit = query.limit.unwrap_or(TOP_DEBTORS_LIMIT);
    let debtors = state.reports.top_debtors(&session, Some(limit)).await?;
    let rows: Vec<DebtorView> = debtors.iter().map(DebtorView::from).collect();
    Ok(Json(ApiResponse::list(rows).in_currency(&state.config.app.currency)))
}

/// GET /api/v1/reports/monthly.csv
pub async fn monthly_csv(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<Response, ApiError> {
    let body = state.reports.monthly_csv(&session).await?;
    Ok(csv_download(MONTHLY_REPORT_FILENAME, body))
}

/// GET /api/v1/reports/arrears.csv
pub async fn arrears_csv(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<Response, ApiError> {
    let body = state.reports.arrears_csv(&session).await?;
    Ok(csv_download(ARREARS_REPORT_FILENAME, body))
}

fn csv_download(filename: &str, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
        ],
        body,
    )
        .into_response()
}
