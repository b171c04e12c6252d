// ============================================================================
// Keja Core - Property Entity
// File: crates/keja-core/src/domain/property.rs
// Description: Property owned by a landlord, and the draft used to create one
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::money::Money;
use super::unit::UnitStatus;
use super::validation::PHONE_REGEX;
use crate::error::DomainError;

/// Property entity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Property {
    pub id: Uuid,
    pub owner_id: Uuid,

    #[validate(length(min = 2, max = 100, message = "Property name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 2, max = 200, message = "Location must be between 2 and 200 characters"))]
    pub location: String,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl Property {
    pub fn new(owner_id: Uuid, name: String, location: String) -> Result<Self, validator::ValidationErrors> {
        let property = Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.trim().to_string(),
            location: location.trim().to_string(),
            created_at: Utc::now(),
            modified_at: None,
        };

        property.validate()?;
        Ok(property)
    }

    pub fn rename(&mut self, name: String, location: String) -> Result<(), validator::ValidationErrors> {
        self.name = name.trim().to_string();
        self.location = location.trim().to_string();
        self.modified_at = Some(Utc::now());
        self.validate()
    }
}

/// One unit row of the "add property" form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UnitDraft {
    #[validate(length(min = 1, max = 20, message = "Unit number must be between 1 and 20 characters"))]
    pub unit_number: String,

    #[validate(range(min = 0i64, max = 1_000_000_000_000i64, message = "Rent must be between 0 and 1,000,000,000,000"))]
    pub rent_amount: i64,

    pub status: UnitStatus,

    #[validate(length(min = 1, max = 100, message = "Tenant name must be between 1 and 100 characters"))]
    pub tenant_name: Option<String>,

    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    pub tenant_phone: Option<String>,
}

impl UnitDraft {
    pub fn rent(&self) -> Money {
        Money::new(self.rent_amount)
    }

    /// Tenant details for a draft marked occupied. A vacant draft carrying
    /// tenant details is also rejected, so the unit status never disagrees
    /// with the tenant link.
    pub fn tenant_details(&self) -> Result<Option<(String, String)>, DomainError> {
        let name = self.tenant_name.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let phone = self.tenant_phone.as_deref().map(str::trim).filter(|s| !s.is_empty());

        match (self.status, name, phone) {
            (UnitStatus::Occupied, Some(name), Some(phone)) => {
                Ok(Some((name.to_string(), phone.to_string())))
            }
            (UnitStatus::Occupied, _, _) => Err(DomainError::ValidationError(format!(
                "Unit {} is marked occupied but tenant name or phone is missing",
                self.unit_number
            ))),
            (UnitStatus::Vacant, None, None) => Ok(None),
            (UnitStatus::Vacant, _, _) => Err(DomainError::ValidationError(format!(
                "Unit {} is marked vacant but has tenant details",
                self.unit_number
            ))),
        }
    }
}

/// Property creation request with its initial units
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PropertyDraft {
    #[validate(length(min = 2, max = 100, message = "Property name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 2, max = 200, message = "Location must be between 2 and 200 characters"))]
    pub location: String,

    #[validate(length(min = 1, message = "Add at least one unit"), nested)]
    pub units: Vec<UnitDraft>,
}

impl PropertyDraft {
    /// Field validation plus the cross-row rules: unique unit numbers and a
    /// tenant for every occupied draft.
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()?;

        let mut seen = std::collections::HashSet::new();
        for draft in &self.units {
            let key = draft.unit_number.trim().to_lowercase();
            if !seen.insert(key) {
                return Err(DomainError::UnitNumberAlreadyExists(draft.unit_number.trim().to_string()));
            }
            draft.tenant_details()?;
        }
        Ok(())
    }
}
