//! PostgreSQL repository implementations

mod rows;

pub mod property_repo_impl;
pub mod unit_repo_impl;
pub mod tenant_repo_impl;
pub mod payment_repo_impl;
pub mod maintenance_repo_impl;
pub mod profile_repo_impl;

#[cfg(test)]
mod tests;

pub use property_repo_impl::PgPropertyRepository;
pub use unit_repo_impl::PgUnitRepository;
pub use tenant_repo_impl::PgTenantRepository;
pub use payment_repo_impl::PgPaymentRepository;
pub use maintenance_repo_impl::PgMaintenanceRepository;
pub use profile_repo_impl::PgProfileRepository;

use keja_core::error::DomainError;
use tracing::error;

/// Logs the failure and wraps it as a `DatabaseError`.
pub(crate) fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error().is_some_and(|d| d.is_unique_violation())
}

pub(crate) fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error().is_some_and(|d| d.is_foreign_key_violation())
}
