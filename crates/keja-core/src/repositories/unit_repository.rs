//! Unit repository trait (port)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Tenant, UnitOccupancy};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait UnitRepository: Send + Sync {
    /// Units of every owned property, or of one property when `property_id`
    /// is given, each with its active tenant.
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        property_id: Option<Uuid>,
    ) -> Result<Vec<UnitOccupancy>, DomainError>;

    async fn find_by_id(&self, owner_id: Uuid, unit_id: Uuid) -> Result<Option<UnitOccupancy>, DomainError>;

    /// Deletes the unit only while it is vacant. Returns false when no
    /// vacant unit with that id remained; fails with `UnitHasHistory` when
    /// former tenants still reference it.
    async fn delete_vacant(&self, unit_id: Uuid) -> Result<bool, DomainError>;

    /// Inserts the tenant and flips the unit to occupied atomically.
    async fn occupy(&self, unit_id: Uuid, tenant: &Tenant) -> Result<(), DomainError>;

    /// Marks the tenant removed and flips the unit to vacant atomically.
    async fn vacate(&self, unit_id: Uuid, tenant_id: Uuid, removed_at: DateTime<Utc>) -> Result<(), DomainError>;
}
