//! Landlord / agency profile

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use keja_shared::constants::DEFAULT_COMMISSION_RATE;

use super::validation::PHONE_REGEX;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Same id as the authenticated user
    pub id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    /// Percent of collections, only meaningful in agency mode
    pub commission_rate: i32,
    pub agency_mode: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            full_name: String::new(),
            phone: None,
            commission_rate: DEFAULT_COMMISSION_RATE,
            agency_mode: false,
            created_at: Utc::now(),
            modified_at: None,
        }
    }

    pub fn apply(&mut self, update: ProfileUpdate) {
        self.full_name = update.full_name.trim().to_string();
        self.phone = update
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        self.commission_rate = update.commission_rate;
        self.agency_mode = update.agency_mode;
        self.modified_at = Some(Utc::now());
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 2, max = 100, message = "Full name must be between 2 and 100 characters"))]
    pub full_name: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    pub phone: Option<String>,

    #[validate(range(min = 0, max = 100, message = "Commission rate must be between 0 and 100"))]
    pub commission_rate: i32,

    #[serde(default)]
    pub agency_mode: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commission_rate_bounds() {
        let update = ProfileUpdate {
            full_name: "Amina Otieno".to_string(),
            phone: None,
            commission_rate: 101,
            agency_mode: true,
        };
        assert!(update.validate().is_err());

        let update = ProfileUpdate { commission_rate: 15, ..update };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_apply_update() {
        let mut profile = Profile::new(Uuid::new_v4());
        assert_eq!(profile.commission_rate, 10);

        profile.apply(ProfileUpdate {
            full_name: " Amina Otieno ".to_string(),
            phone: Some("0722000111".to_string()),
            commission_rate: 12,
            agency_mode: true,
        });
        assert_eq!(profile.full_name, "Amina Otieno");
        assert_eq!(profile.phone.as_deref(), Some("0722000111"));
        assert!(profile.agency_mode);
        assert!(profile.modified_at.is_some());
    }
}
