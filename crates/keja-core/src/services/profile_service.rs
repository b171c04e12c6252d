//! Profile settings for the signed-in landlord or agency

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::domain::{Profile, ProfileUpdate, Session};
use crate::error::DomainError;
use crate::repositories::ProfileRepository;

pub struct ProfileService {
    profile_repo: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(profile_repo: Arc<dyn ProfileRepository>) -> Self {
        Self { profile_repo }
    }

    /// Returns the stored profile, creating a default one on first access.
    pub async fn get_or_create(&self, session: &Session) -> Result<Profile, DomainError> {
        if let Some(profile) = self.profile_repo.find(session.user_id).await? {
            return Ok(profile);
        }

        let profile = self.profile_repo.upsert(&Profile::new(session.user_id)).await?;
        info!("Created profile for user {}", session.user_id);
        Ok(profile)
    }

    pub async fn update(&self, session: &Session, update: ProfileUpdate) -> Result<Profile, DomainError> {
        update.validate()?;

        let mut profile = self
            .profile_repo
            .find(session.user_id)
            .await?
            .unwrap_or_else(|| Profile::new(session.user_id));
        profile.apply(update);

        let saved = self.profile_repo.upsert(&profile).await?;
        info!("Profile {} updated", saved.id);
        Ok(saved)
    }
}
