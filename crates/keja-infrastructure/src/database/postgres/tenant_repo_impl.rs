// ============================================================================
// Keja Infrastructure - PostgreSQL Tenant Repository
// File: crates/keja-infrastructure/src/database/postgres/tenant_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use keja_core::domain::{Tenant, TenantRecord};
use keja_core::error::DomainError;
use keja_core::repositories::TenantRepository;

use super::db_error;
use super::rows::{TenantRecordRow, TenantRow};

const RECORD_SELECT: &str = r#"
    SELECT
        t.id, t.unit_id, t.name, t.phone, t.created_at, t.modified_at, t.removed_at,
        u.unit_number, u.rent_amount, u.property_id,
        p.name AS property_name
    FROM tenants t
    JOIN units u ON u.id = t.unit_id
    JOIN properties p ON p.id = u.property_id
"#;

pub struct PgTenantRepository {
    pool: PgPool,
}

impl PgTenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantRepository for PgTenantRepository {
    async fn list_active_by_owner(&self, owner_id: Uuid) -> Result<Vec<TenantRecord>, DomainError> {
        let sql = format!(
            "{} WHERE p.user_id = $1 AND t.removed_at IS NULL ORDER BY t.name",
            RECORD_SELECT
        );
        let rows: Vec<TenantRecordRow> = sqlx::query_as(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing tenants"))?;

        Ok(rows.into_iter().map(TenantRecord::from).collect())
    }

    async fn find_active(&self, owner_id: Uuid, tenant_id: Uuid) -> Result<Option<TenantRecord>, DomainError> {
        let sql = format!(
            "{} WHERE t.id = $1 AND p.user_id = $2 AND t.removed_at IS NULL",
            RECORD_SELECT
        );
        let row: Option<TenantRecordRow> = sqlx::query_as(&sql)
            .bind(tenant_id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding tenant"))?;

        Ok(row.map(TenantRecord::from))
    }

    async fn update_contact(&self, tenant: &Tenant) -> Result<Tenant, DomainError> {
        let row: Option<TenantRow> = sqlx::query_as(
            r#"
            UPDATE tenants
            SET name = $2, phone = $3, modified_at = $4
            WHERE id = $1 AND removed_at IS NULL
            RETURNING id, unit_id, name, phone, created_at, modified_at, removed_at
            "#,
        )
        .bind(tenant.id)
        .bind(&tenant.name)
        .bind(&tenant.phone)
        .bind(tenant.modified_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("updating tenant"))?;

        row.map(Tenant::from).ok_or(DomainError::TenantNotFound(tenant.id))
    }
}
