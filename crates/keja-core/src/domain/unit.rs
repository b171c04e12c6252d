// ============================================================================
// Keja Core - Unit Entity
// File: crates/keja-core/src/domain/unit.rs
// Description: Rentable unit with its vacant/occupied state machine
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::Money;
use super::tenant::Tenant;
use crate::error::DomainError;

/// Unit occupancy status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    Vacant,
    Occupied,
}

impl UnitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitStatus::Vacant => "vacant",
            UnitStatus::Occupied => "occupied",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "vacant" => Some(UnitStatus::Vacant),
            "occupied" => Some(UnitStatus::Occupied),
            _ => None,
        }
    }
}

impl Default for UnitStatus {
    fn default() -> Self {
        UnitStatus::Vacant
    }
}

/// Unit entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: Uuid,
    pub property_id: Uuid,
    pub unit_number: String,
    pub rent_amount: Money,
    pub status: UnitStatus,
    pub created_at: DateTime<Utc>,
}

impl Unit {
    pub fn new(property_id: Uuid, unit_number: String, rent_amount: Money) -> Result<Self, DomainError> {
        let unit_number = unit_number.trim().to_string();
        if unit_number.is_empty() {
            return Err(DomainError::ValidationError("Unit number is required".to_string()));
        }
        if rent_amount.is_negative() {
            return Err(DomainError::ValidationError("Rent cannot be negative".to_string()));
        }
        if !rent_amount.is_entry_in_range() {
            return Err(DomainError::ValidationError(format!("Rent cannot exceed {}", Money::MAX_ENTRY)));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            property_id,
            unit_number,
            rent_amount,
            status: UnitStatus::Vacant,
            created_at: Utc::now(),
        })
    }

    pub fn is_occupied(&self) -> bool {
        self.status == UnitStatus::Occupied
    }

    /// vacant → occupied
    pub fn occupy(&mut self) -> Result<(), DomainError> {
        match self.status {
            UnitStatus::Vacant => {
                self.status = UnitStatus::Occupied;
                Ok(())
            }
            UnitStatus::Occupied => Err(DomainError::UnitAlreadyOccupied(self.unit_number.clone())),
        }
    }

    /// occupied → vacant
    pub fn vacate(&mut self) -> Result<(), DomainError> {
        match self.status {
            UnitStatus::Occupied => {
                self.status = UnitStatus::Vacant;
                Ok(())
            }
            UnitStatus::Vacant => Err(DomainError::UnitNotOccupied(self.unit_number.clone())),
        }
    }
}

/// A unit joined with its property name and (at most one) active tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitOccupancy {
    pub unit: Unit,
    pub property_name: String,
    pub tenant: Option<Tenant>,
}

impl UnitOccupancy {
    /// Rejects rows where the status column and the tenant link disagree.
    pub fn check_consistency(&self) -> Result<(), DomainError> {
        match (self.unit.status, &self.tenant) {
            (UnitStatus::Occupied, Some(_)) | (UnitStatus::Vacant, None) => Ok(()),
            (UnitStatus::Occupied, None) => Err(DomainError::ConsistencyError(format!(
                "Unit {} is occupied without a tenant",
                self.unit.id
            ))),
            (UnitStatus::Vacant, Some(t)) => Err(DomainError::ConsistencyError(format!(
                "Unit {} is vacant but linked to tenant {}",
                self.unit.id, t.id
            ))),
        }
    }
}
