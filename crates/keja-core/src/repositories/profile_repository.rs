//! Profile repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Profile;
use crate::error::DomainError;

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find(&self, id: Uuid) -> Result<Option<Profile>, DomainError>;
    async fn upsert(&self, profile: &Profile) -> Result<Profile, DomainError>;
}
