//! Property repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Property, Tenant, Unit};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Property>, DomainError>;
    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Property>, DomainError>;

    /// Inserts the property, its units and any initial tenants in one
    /// transaction.
    async fn create_with_units(
        &self,
        property: &Property,
        units: &[(Unit, Option<Tenant>)],
    ) -> Result<Property, DomainError>;

    async fn update(&self, property: &Property) -> Result<Property, DomainError>;
}
