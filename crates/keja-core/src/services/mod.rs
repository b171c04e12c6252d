//! Application services (use cases)

pub mod payment_recorder;
pub mod tenancy_service;
pub mod property_service;
pub mod report_service;
pub mod maintenance_service;
pub mod profile_service;

pub use payment_recorder::{PaymentRecorder, Receipt};
pub use tenancy_service::{TenancyService, TenantFilter, TenantSummary};
pub use property_service::{PropertyOverview, PropertyService};
pub use report_service::ReportService;
pub use maintenance_service::MaintenanceService;
pub use profile_service::ProfileService;
