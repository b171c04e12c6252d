//! Maintenance request service

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{MaintenanceEntry, MaintenanceRequest, MaintenanceStatus, Session};
use crate::error::DomainError;
use crate::repositories::{MaintenanceRepository, UnitRepository};

pub struct MaintenanceService {
    maintenance_repo: Arc<dyn MaintenanceRepository>,
    unit_repo: Arc<dyn UnitRepository>,
}

impl MaintenanceService {
    pub fn new(maintenance_repo: Arc<dyn MaintenanceRepository>, unit_repo: Arc<dyn UnitRepository>) -> Self {
        Self {
            maintenance_repo,
            unit_repo,
        }
    }

    pub async fn list(&self, session: &Session) -> Result<Vec<MaintenanceEntry>, DomainError> {
        self.maintenance_repo.list_by_owner(session.user_id).await
    }

    pub async fn create(
        &self,
        session: &Session,
        unit_id: Uuid,
        description: String,
    ) -> Result<MaintenanceRequest, DomainError> {
        self.unit_repo
            .find_by_id(session.user_id, unit_id)
            .await?
            .ok_or(DomainError::UnitNotFound(unit_id))?;

        let request = MaintenanceRequest::new(unit_id, description)?;
        let created = self.maintenance_repo.create(&request).await?;
        info!("Maintenance request {} opened for unit {}", created.id, unit_id);
        Ok(created)
    }

    /// Moves a request exactly one step along pending → in_progress → completed.
    pub async fn advance(
        &self,
        session: &Session,
        request_id: Uuid,
        target: MaintenanceStatus,
    ) -> Result<MaintenanceRequest, DomainError> {
        let mut request = self
            .maintenance_repo
            .find_by_id(session.user_id, request_id)
            .await?
            .ok_or(DomainError::MaintenanceRequestNotFound(request_id))?;

        let previous = request.status;
        request.advance_to(target).map_err(|e| {
            warn!("Maintenance request {}: {}", request_id, e);
            e
        })?;

        let updated = self.maintenance_repo.update_status(&request, previous).await?;
        info!(
            "Maintenance request {} moved {} -> {}",
            request_id,
            previous.as_str(),
            updated.status.as_str()
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Money, Unit, UnitOccupancy};
    use crate::repositories::{MockMaintenanceRepository, MockUnitRepository};

    fn request(status: MaintenanceStatus) -> MaintenanceRequest {
        let mut request = MaintenanceRequest::new(Uuid::new_v4(), "Broken window latch".to_string()).unwrap();
        request.status = status;
        request
    }

    #[tokio::test]
    async fn test_create_for_owned_unit() {
        let unit = Unit::new(Uuid::new_v4(), "A1".to_string(), Money::new(9000)).unwrap();
        let unit_id = unit.id;
        let row = UnitOccupancy {
            unit,
            property_name: "Sunrise Court".to_string(),
            tenant: None,
        };

        let mut units = MockUnitRepository::new();
        units.expect_find_by_id().returning(move |_, _| Ok(Some(row.clone())));
        let mut maintenance = MockMaintenanceRepository::new();
        maintenance.expect_create().times(1).returning(|r| Ok(r.clone()));

        let service = MaintenanceService::new(Arc::new(maintenance), Arc::new(units));
        let created = service
            .create(&Session::new(Uuid::new_v4()), unit_id, "Broken window latch".to_string())
            .await
            .unwrap();
        assert_eq!(created.status, MaintenanceStatus::Pending);
        assert_eq!(created.unit_id, unit_id);
    }

    #[tokio::test]
    async fn test_create_for_foreign_unit() {
        let mut units = MockUnitRepository::new();
        units.expect_find_by_id().returning(|_, _| Ok(None));
        let mut maintenance = MockMaintenanceRepository::new();
        maintenance.expect_create().never();

        let service = MaintenanceService::new(Arc::new(maintenance), Arc::new(units));
        let result = service
            .create(&Session::new(Uuid::new_v4()), Uuid::new_v4(), "Broken window latch".to_string())
            .await;
        assert!(matches!(result, Err(DomainError::UnitNotFound(_))));
    }

    #[tokio::test]
    async fn test_advance_one_step() {
        let existing = request(MaintenanceStatus::Pending);
        let id = existing.id;

        let mut maintenance = MockMaintenanceRepository::new();
        maintenance.expect_find_by_id().returning(move |_, _| Ok(Some(existing.clone())));
        maintenance
            .expect_update_status()
            .withf(|r, expected| r.status == MaintenanceStatus::InProgress && *expected == MaintenanceStatus::Pending)
            .times(1)
            .returning(|r, _| Ok(r.clone()));

        let service = MaintenanceService::new(Arc::new(maintenance), Arc::new(MockUnitRepository::new()));
        let updated = service
            .advance(&Session::new(Uuid::new_v4()), id, MaintenanceStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(updated.status, MaintenanceStatus::InProgress);
    }

    #[tokio::test]
    async fn test_completed_cannot_reopen() {
        let existing = request(MaintenanceStatus::Completed);
        let id = existing.id;

        let mut maintenance = MockMaintenanceRepository::new();
        maintenance.expect_find_by_id().returning(move |_, _| Ok(Some(existing.clone())));
        maintenance.expect_update_status().never();

        let service = MaintenanceService::new(Arc::new(maintenance), Arc::new(MockUnitRepository::new()));
        let result = service
            .advance(&Session::new(Uuid::new_v4()), id, MaintenanceStatus::Pending)
            .await;
        assert!(matches!(result, Err(DomainError::InvalidStatusTransition { .. })));
    }
}
