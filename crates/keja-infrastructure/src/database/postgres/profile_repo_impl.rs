//! PostgreSQL profile repository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use keja_core::domain::Profile;
use keja_core::error::DomainError;
use keja_core::repositories::ProfileRepository;

use super::db_error;
use super::rows::ProfileRow;

pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find(&self, id: Uuid) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT id, full_name, phone, commission_rate, agency_mode, created_at, modified_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding profile"))?;

        Ok(row.map(Profile::from))
    }

    async fn upsert(&self, profile: &Profile) -> Result<Profile, DomainError> {
        let row: ProfileRow = sqlx::query_as(
            r#"
            INSERT INTO profiles (id, full_name, phone, commission_rate, agency_mode, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE
            SET full_name = EXCLUDED.full_name,
                phone = EXCLUDED.phone,
                commission_rate = EXCLUDED.commission_rate,
                agency_mode = EXCLUDED.agency_mode,
                modified_at = EXCLUDED.modified_at
            RETURNING id, full_name, phone, commission_rate, agency_mode, created_at, modified_at
            "#,
        )
        .bind(profile.id)
        .bind(&profile.full_name)
        .bind(&profile.phone)
        .bind(profile.commission_rate)
        .bind(profile.agency_mode)
        .bind(profile.created_at)
        .bind(profile.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("saving profile"))?;

        Ok(row.into())
    }
}
