//! Maintenance request repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{MaintenanceEntry, MaintenanceRequest, MaintenanceStatus};
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    /// Newest first.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<MaintenanceEntry>, DomainError>;
    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<MaintenanceRequest>, DomainError>;
    async fn create(&self, request: &MaintenanceRequest) -> Result<MaintenanceRequest, DomainError>;

    /// Writes the request's new status only if the stored status is still
    /// `expected`.
    async fn update_status(
        &self,
        request: &MaintenanceRequest,
        expected: MaintenanceStatus,
    ) -> Result<MaintenanceRequest, DomainError>;
}
