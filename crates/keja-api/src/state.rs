//! Shared application state

use std::sync::Arc;

use sqlx::PgPool;

use keja_core::repositories::{
    MaintenanceRepository, PaymentRepository, ProfileRepository, PropertyRepository, TenantRepository, UnitRepository,
};
use keja_core::services::{
    MaintenanceService, PaymentRecorder, ProfileService, PropertyService, ReportService, TenancyService,
};
use keja_shared::config::AppConfig;

use crate::auth::JwtVerifier;

/// The repository adapters the services are built from
#[derive(Clone)]
pub struct Repositories {
    pub properties: Arc<dyn PropertyRepository>,
    pub units: Arc<dyn UnitRepository>,
    pub tenants: Arc<dyn TenantRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub maintenance: Arc<dyn MaintenanceRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Present in the running server; used by the readiness probe
    pub db: Option<PgPool>,
    pub jwt: Arc<JwtVerifier>,
    pub properties: Arc<PropertyService>,
    pub tenancy: Arc<TenancyService>,
    pub payments: Arc<PaymentRecorder>,
    pub reports: Arc<ReportService>,
    pub maintenance: Arc<MaintenanceService>,
    pub profiles: Arc<ProfileService>,
}

impl AppState {
    pub fn new(config: AppConfig, repos: Repositories, db: Option<PgPool>) -> Self {
        let jwt = Arc::new(JwtVerifier::new(&config.auth));

        Self {
            jwt,
            db,
            properties: Arc::new(PropertyService::new(repos.properties.clone(), repos.units.clone())),
            tenancy: Arc::new(TenancyService::new(
                repos.units.clone(),
                repos.tenants.clone(),
                repos.payments.clone(),
            )),
            payments: Arc::new(PaymentRecorder::new(
                repos.tenants.clone(),
                repos.payments.clone(),
                config.app.currency.clone(),
            )),
            reports: Arc::new(ReportService::new(
                repos.properties.clone(),
                repos.units.clone(),
                repos.tenants.clone(),
                repos.payments.clone(),
            )),
            maintenance: Arc::new(MaintenanceService::new(repos.maintenance.clone(), repos.units.clone())),
            profiles: Arc::new(ProfileService::new(repos.profiles)),
            config: Arc::new(config),
        }
    }
}
