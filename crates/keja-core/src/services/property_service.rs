//! Property service: portfolio listing, creation with initial units, edits

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{Property, PropertyDraft, Session, Tenant, TenantContact, Unit, UnitOccupancy};
use crate::error::DomainError;
use crate::reports::{property_stats, PropertyStats};
use crate::repositories::{PropertyRepository, UnitRepository};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyOverview {
    pub property: Property,
    pub stats: PropertyStats,
}

pub struct PropertyService {
    property_repo: Arc<dyn PropertyRepository>,
    unit_repo: Arc<dyn UnitRepository>,
}

impl PropertyService {
    pub fn new(property_repo: Arc<dyn PropertyRepository>, unit_repo: Arc<dyn UnitRepository>) -> Self {
        Self {
            property_repo,
            unit_repo,
        }
    }

    pub async fn list_with_stats(&self, session: &Session) -> Result<Vec<PropertyOverview>, DomainError> {
        let properties = self.property_repo.list_by_owner(session.user_id).await?;
        let units: Vec<Unit> = self
            .unit_repo
            .list_by_owner(session.user_id, None)
            .await?
            .into_iter()
            .map(|row| row.unit)
            .collect();

        let ids: Vec<Uuid> = properties.iter().map(|p| p.id).collect();
        let stats = property_stats(&ids, &units);

        Ok(properties
            .into_iter()
            .zip(stats)
            .map(|(property, stats)| PropertyOverview { property, stats })
            .collect())
    }

    pub async fn get_property(&self, session: &Session, property_id: Uuid) -> Result<PropertyOverview, DomainError> {
        let property = self
            .property_repo
            .find_by_id(session.user_id, property_id)
            .await?
            .ok_or(DomainError::PropertyNotFound(property_id))?;

        let units: Vec<Unit> = self
            .unit_repo
            .list_by_owner(session.user_id, Some(property_id))
            .await?
            .into_iter()
            .map(|row: UnitOccupancy| row.unit)
            .collect();

        let stats = property_stats(&[property_id], &units)
            .pop()
            .ok_or_else(|| DomainError::InternalError("missing property stats".to_string()))?;
        Ok(PropertyOverview { property, stats })
    }

    /// Creates the property and every draft unit together. Occupied drafts
    /// get their tenant in the same write.
    pub async fn create_property(&self, session: &Session, draft: PropertyDraft) -> Result<PropertyOverview, DomainError> {
        draft.check().map_err(|e| {
            warn!("Rejected property draft from user {}: {}", session.user_id, e);
            e
        })?;

        let property = Property::new(session.user_id, draft.name.clone(), draft.location.clone())?;

        let mut units = Vec::with_capacity(draft.units.len());
        for unit_draft in &draft.units {
            let mut unit = Unit::new(property.id, unit_draft.unit_number.clone(), unit_draft.rent())?;
            let tenant = match unit_draft.tenant_details()? {
                Some((name, phone)) => {
                    unit.occupy()?;
                    Some(Tenant::new(unit.id, TenantContact::new(&name, &phone)?))
                }
                None => None,
            };
            units.push((unit, tenant));
        }

        let created = self.property_repo.create_with_units(&property, &units).await?;
        info!("Property {} created with {} units", created.id, units.len());

        let unit_rows: Vec<Unit> = units.into_iter().map(|(unit, _)| unit).collect();
        let stats = property_stats(&[created.id], &unit_rows)
            .pop()
            .ok_or_else(|| DomainError::InternalError("missing property stats".to_string()))?;
        Ok(PropertyOverview {
            property: created,
            stats,
        })
    }

    pub async fn update_property(
        &self,
        session: &Session,
        property_id: Uuid,
        name: String,
        location: String,
    ) -> Result<Property, DomainError> {
        let mut property = self
            .property_repo
            .find_by_id(session.user_id, property_id)
            .await?
            .ok_or(DomainError::PropertyNotFound(property_id))?;

        property.rename(name, location)?;
        let updated = self.property_repo.update(&property).await?;
        info!("Property {} updated", property_id);
        Ok(updated)
    }
}
