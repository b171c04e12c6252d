// ============================================================================
// Keja Infrastructure - PostgreSQL Unit Repository
// File: crates/keja-infrastructure/src/database/postgres/unit_repo_impl.rs
// Description: Unit listing plus the atomic occupy / vacate transitions
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{error, info, warn};
use uuid::Uuid;

use keja_core::domain::{Tenant, UnitOccupancy};
use keja_core::error::DomainError;
use keja_core::repositories::UnitRepository;

use super::rows::{convert_all, UnitOccupancyRow};
use super::{db_error, is_foreign_key_violation, is_unique_violation};

const OCCUPANCY_SELECT: &str = r#"
    SELECT
        u.id, u.property_id, u.unit_number, u.rent_amount, u.status, u.created_at,
        p.name AS property_name,
        t.id AS tenant_id, t.name AS tenant_name, t.phone AS tenant_phone,
        t.created_at AS tenant_created_at, t.modified_at AS tenant_modified_at
    FROM units u
    JOIN properties p ON p.id = u.property_id
    LEFT JOIN tenants t ON t.unit_id = u.id AND t.removed_at IS NULL
"#;

pub struct PgUnitRepository {
    pool: PgPool,
}

impl PgUnitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitRepository for PgUnitRepository {
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        property_id: Option<Uuid>,
    ) -> Result<Vec<UnitOccupancy>, DomainError> {
        let sql = format!(
            "{} WHERE p.user_id = $1 AND ($2::uuid IS NULL OR u.property_id = $2) ORDER BY p.name, u.unit_number",
            OCCUPANCY_SELECT
        );
        let rows: Vec<UnitOccupancyRow> = sqlx::query_as(&sql)
            .bind(owner_id)
            .bind(property_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing units"))?;

        convert_all(rows)
    }

    async fn find_by_id(&self, owner_id: Uuid, unit_id: Uuid) -> Result<Option<UnitOccupancy>, DomainError> {
        let sql = format!("{} WHERE u.id = $1 AND p.user_id = $2", OCCUPANCY_SELECT);
        let row: Option<UnitOccupancyRow> = sqlx::query_as(&sql)
            .bind(unit_id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding unit"))?;

        row.map(UnitOccupancy::try_from).transpose()
    }

    async fn delete_vacant(&self, unit_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM units WHERE id = $1 AND status = 'vacant'")
            .bind(unit_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    warn!("Unit {} still referenced by former tenants", unit_id);
                    DomainError::UnitHasHistory(unit_id.to_string())
                } else {
                    error!("Database error deleting unit: {}", e);
                    DomainError::DatabaseError(e.to_string())
                }
            })?;

        Ok(result.rows_affected() == 1)
    }

    async fn occupy(&self, unit_id: Uuid, tenant: &Tenant) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("starting occupy transaction"))?;

        let flipped = sqlx::query("UPDATE units SET status = 'occupied' WHERE id = $1 AND status = 'vacant'")
            .bind(unit_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("marking unit occupied"))?;

        if flipped.rows_affected() == 0 {
            warn!("Unit {} was no longer vacant", unit_id);
            return Err(DomainError::UnitAlreadyOccupied(unit_id.to_string()));
        }

        sqlx::query(
            r#"
            INSERT INTO tenants (id, unit_id, name, phone, balance, created_at)
            SELECT $1, u.id, $2, $3, -u.rent_amount, $4
            FROM units u
            WHERE u.id = $5
            "#,
        )
        .bind(tenant.id)
        .bind(&tenant.name)
        .bind(&tenant.phone)
        .bind(tenant.created_at)
        .bind(unit_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::UnitAlreadyOccupied(unit_id.to_string())
            } else {
                error!("Database error inserting tenant: {}", e);
                DomainError::DatabaseError(e.to_string())
            }
        })?;

        tx.commit().await.map_err(db_error("committing occupy"))?;
        info!("Unit {} occupied by tenant {}", unit_id, tenant.id);
        Ok(())
    }

    async fn vacate(&self, unit_id: Uuid, tenant_id: Uuid, removed_at: DateTime<Utc>) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("starting vacate transaction"))?;

        let removed = sqlx::query(
            r#"
            UPDATE tenants
            SET removed_at = $3, modified_at = $3
            WHERE id = $1 AND unit_id = $2 AND removed_at IS NULL
            "#,
        )
        .bind(tenant_id)
        .bind(unit_id)
        .bind(removed_at)
        .execute(&mut *tx)
        .await
        .map_err(db_error("removing tenant"))?;

        if removed.rows_affected() == 0 {
            return Err(DomainError::ConsistencyError(format!(
                "Tenant {} is not the active tenant of unit {}",
                tenant_id, unit_id
            )));
        }

        let flipped = sqlx::query("UPDATE units SET status = 'vacant' WHERE id = $1 AND status = 'occupied'")
            .bind(unit_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("marking unit vacant"))?;

        if flipped.rows_affected() == 0 {
            return Err(DomainError::UnitNotOccupied(unit_id.to_string()));
        }

        tx.commit().await.map_err(db_error("committing vacate"))?;
        info!("Unit {} vacated", unit_id);
        Ok(())
    }
}
