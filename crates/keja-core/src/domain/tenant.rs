//! Tenant domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::money::Money;
use super::validation::PHONE_REGEX;

/// Name and phone as entered on the occupy / edit tenant form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TenantContact {
    #[validate(length(min = 1, max = 100, message = "Tenant name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    pub phone: String,
}

impl TenantContact {
    pub fn new(name: &str, phone: &str) -> Result<Self, validator::ValidationErrors> {
        let contact = Self {
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
        };
        contact.validate()?;
        Ok(contact)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub name: String,
    pub phone: String,

    // Audit
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    /// Set when the tenant vacates; payment history stays attached.
    pub removed_at: Option<DateTime<Utc>>,
}

impl Tenant {
    pub fn new(unit_id: Uuid, contact: TenantContact) -> Self {
        Self {
            id: Uuid::new_v4(),
            unit_id,
            name: contact.name,
            phone: contact.phone,
            created_at: Utc::now(),
            modified_at: None,
            removed_at: None,
        }
    }

    pub fn update_contact(&mut self, contact: TenantContact) {
        self.name = contact.name;
        self.phone = contact.phone;
        self.modified_at = Some(Utc::now());
    }

    pub fn is_active(&self) -> bool {
        self.removed_at.is_none()
    }
}

/// Active tenant joined with the unit and property it occupies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantRecord {
    pub tenant: Tenant,
    pub unit_number: String,
    pub rent_amount: Money,
    pub property_id: Uuid,
    pub property_name: String,
}

impl TenantRecord {
    /// Case-insensitive substring match on name, phone, or unit number.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.tenant.name.to_lowercase().contains(&query)
            || self.tenant.phone.contains(&query)
            || self.unit_number.to_lowercase().contains(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> TenantRecord {
        let contact = TenantContact::new("Jane Wanjiku", "0712 345 678").unwrap();
        TenantRecord {
            tenant: Tenant::new(Uuid::new_v4(), contact),
            unit_number: "A4".to_string(),
            rent_amount: Money::new(15000),
            property_id: Uuid::new_v4(),
            property_name: "Sunrise Court".to_string(),
        }
    }

    #[test]
    fn test_contact_validation() {
        assert!(TenantContact::new("Jane", "+254712345678").is_ok());
        assert!(TenantContact::new("", "0712345678").is_err());
        assert!(TenantContact::new("Jane", "12").is_err());
    }

    #[test]
    fn test_search_matches_name_phone_and_unit() {
        let record = record();
        assert!(record.matches_query("jane"));
        assert!(record.matches_query("345"));
        assert!(record.matches_query("a4"));
        assert!(record.matches_query("  "));
        assert!(!record.matches_query("peter"));
    }

    #[test]
    fn test_update_contact_sets_modified() {
        let mut tenant = record().tenant;
        tenant.update_contact(TenantContact::new("Jane W.", "0700000000").unwrap());
        assert_eq!(tenant.name, "Jane W.");
        assert!(tenant.modified_at.is_some());
        assert!(tenant.is_active());
    }
}
