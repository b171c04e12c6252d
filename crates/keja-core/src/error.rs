//! Domain errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Property not found: {0}")]
    PropertyNotFound(Uuid),

    #[error("Unit not found: {0}")]
    UnitNotFound(Uuid),

    #[error("Tenant not found: {0}")]
    TenantNotFound(Uuid),

    #[error("Payment not found: {0}")]
    PaymentNotFound(Uuid),

    #[error("Maintenance request not found: {0}")]
    MaintenanceRequestNotFound(Uuid),

    #[error("Unit number already exists in property: {0}")]
    UnitNumberAlreadyExists(String),

    #[error("Unit {0} is already occupied")]
    UnitAlreadyOccupied(String),

    #[error("Unit {0} is vacant")]
    UnitNotOccupied(String),

    #[error("Unit {0} is occupied and cannot be deleted")]
    UnitOccupied(String),

    #[error("Unit {0} has payment history and cannot be deleted")]
    UnitHasHistory(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Consistency error: {0}")]
    ConsistencyError(String),

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
