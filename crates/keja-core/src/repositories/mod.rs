//! Repository traits (ports)
//!
//! Every read is scoped to the owning landlord: a row that exists but belongs
//! to someone else is reported as absent.

pub mod property_repository;
pub mod unit_repository;
pub mod tenant_repository;
pub mod payment_repository;
pub mod maintenance_repository;
pub mod profile_repository;

pub use property_repository::PropertyRepository;
pub use unit_repository::UnitRepository;
pub use tenant_repository::TenantRepository;
pub use payment_repository::{PaymentRepository, RecordedPayment};
pub use maintenance_repository::MaintenanceRepository;
pub use profile_repository::ProfileRepository;

#[cfg(any(test, feature = "mocks"))]
pub use property_repository::MockPropertyRepository;
#[cfg(any(test, feature = "mocks"))]
pub use unit_repository::MockUnitRepository;
#[cfg(any(test, feature = "mocks"))]
pub use tenant_repository::MockTenantRepository;
#[cfg(any(test, feature = "mocks"))]
pub use payment_repository::MockPaymentRepository;
#[cfg(any(test, feature = "mocks"))]
pub use maintenance_repository::MockMaintenanceRepository;
#[cfg(any(test, feature = "mocks"))]
pub use profile_repository::MockProfileRepository;
