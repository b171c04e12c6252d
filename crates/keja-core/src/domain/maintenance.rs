// ============================================================================
// Keja Core - Maintenance Request Entity
// File: crates/keja-core/src/domain/maintenance.rs
// Description: Repair request with a forward-only status workflow
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainError;

/// pending → in_progress → completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Pending,
    InProgress,
    Completed,
}

impl MaintenanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Pending => "pending",
            MaintenanceStatus::InProgress => "in_progress",
            MaintenanceStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(MaintenanceStatus::Pending),
            "in_progress" => Some(MaintenanceStatus::InProgress),
            "completed" => Some(MaintenanceStatus::Completed),
            _ => None,
        }
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            MaintenanceStatus::Pending => Some(MaintenanceStatus::InProgress),
            MaintenanceStatus::InProgress => Some(MaintenanceStatus::Completed),
            MaintenanceStatus::Completed => None,
        }
    }
}

impl Default for MaintenanceStatus {
    fn default() -> Self {
        MaintenanceStatus::Pending
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MaintenanceRequest {
    pub id: Uuid,
    pub unit_id: Uuid,

    #[validate(length(min = 3, max = 2000, message = "Description must be between 3 and 2000 characters"))]
    pub description: String,

    pub status: MaintenanceStatus,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl MaintenanceRequest {
    pub fn new(unit_id: Uuid, description: String) -> Result<Self, validator::ValidationErrors> {
        let request = Self {
            id: Uuid::new_v4(),
            unit_id,
            description: description.trim().to_string(),
            status: MaintenanceStatus::Pending,
            created_at: Utc::now(),
            modified_at: None,
        };

        request.validate()?;
        Ok(request)
    }

    /// Moves exactly one step forward; anything else is rejected.
    pub fn advance_to(&mut self, target: MaintenanceStatus) -> Result<(), DomainError> {
        if self.status.next() != Some(target) {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status.as_str().to_string(),
                to: target.as_str().to_string(),
            });
        }
        self.status = target;
        self.modified_at = Some(Utc::now());
        Ok(())
    }
}

/// Request joined with the unit, property and current tenant labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceEntry {
    pub request: MaintenanceRequest,
    pub unit_number: String,
    pub property_name: String,
    pub tenant_name: Option<String>,
}
