//! Route table and middleware stack

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::handlers::{health, maintenance, payments, profile, properties, reports, tenants, units};
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origins);
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let api = Router::new()
        .route("/dashboard", get(reports::dashboard))
        // Properties
        .route("/properties", get(properties::list_properties).post(properties::create_property))
        .route("/properties/{id}", get(properties::get_property).put(properties::update_property))
        // Units
        .route("/units", get(units::list_units))
        .route("/units/{id}", delete(units::delete_unit))
        .route("/units/{id}/occupy", post(units::occupy_unit))
        .route("/units/{id}/vacate", post(units::vacate_unit))
        // Tenants
        .route("/tenants", get(tenants::list_tenants))
        .route("/tenants/{id}", put(tenants::update_tenant))
        .route("/tenants/{id}/ledger", get(tenants::tenant_ledger))
        // Payments
        .route("/payments", get(payments::list_payments).post(payments::record_payment))
        .route("/payments/{id}/receipt", get(payments::payment_receipt))
        // Reports
        .route("/reports/summary", get(reports::summary))
        .route("/reports/monthly", get(reports::monthly))
        .route("/reports/top-debtors", get(reports::top_debtors))
        .route("/reports/monthly.csv", get(reports::monthly_csv))
        .route("/reports/arrears.csv", get(reports::arrears_csv))
        // Maintenance
        .route("/maintenance", get(maintenance::list_requests).post(maintenance::create_request))
        .route("/maintenance/{id}/status", patch(maintenance::advance_request))
        // Settings
        .route("/profile", get(profile::get_profile).put(profile::update_profile));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/api/v1", api)
        .with_state(state)
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(cors)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
