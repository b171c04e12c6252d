//! Tenant repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Tenant, TenantRecord};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn list_active_by_owner(&self, owner_id: Uuid) -> Result<Vec<TenantRecord>, DomainError>;
    async fn find_active(&self, owner_id: Uuid, tenant_id: Uuid) -> Result<Option<TenantRecord>, DomainError>;
    async fn update_contact(&self, tenant: &Tenant) -> Result<Tenant, DomainError>;
}
