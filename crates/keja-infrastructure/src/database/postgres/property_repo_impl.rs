// ============================================================================
// Keja Infrastructure - PostgreSQL Property Repository
// File: crates/keja-infrastructure/src/database/postgres/property_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use keja_core::domain::{Property, Tenant, Unit};
use keja_core::error::DomainError;
use keja_core::repositories::PropertyRepository;

use super::rows::PropertyRow;
use super::{db_error, is_unique_violation};

pub struct PgPropertyRepository {
    pool: PgPool,
}

impl PgPropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PropertyRepository for PgPropertyRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Property>, DomainError> {
        let rows: Vec<PropertyRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, location, created_at, modified_at
            FROM properties
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing properties"))?;

        Ok(rows.into_iter().map(Property::from).collect())
    }

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Property>, DomainError> {
        let row: Option<PropertyRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, location, created_at, modified_at
            FROM properties
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding property"))?;

        Ok(row.map(Property::from))
    }

    async fn create_with_units(
        &self,
        property: &Property,
        units: &[(Unit, Option<Tenant>)],
    ) -> Result<Property, DomainError> {
        info!("Creating property {} with {} units", property.name, units.len());

        let mut tx = self.pool.begin().await.map_err(db_error("starting property transaction"))?;

        let row: PropertyRow = sqlx::query_as(
            r#"
            INSERT INTO properties (id, user_id, name, location, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, name, location, created_at, modified_at
            "#,
        )
        .bind(property.id)
        .bind(property.owner_id)
        .bind(&property.name)
        .bind(&property.location)
        .bind(property.created_at)
        .bind(property.modified_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("inserting property"))?;

        for (unit, tenant) in units {
            sqlx::query(
                r#"
                INSERT INTO units (id, property_id, unit_number, rent_amount, status, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(unit.id)
            .bind(row.id)
            .bind(&unit.unit_number)
            .bind(unit.rent_amount.amount())
            .bind(unit.status.as_str())
            .bind(unit.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::UnitNumberAlreadyExists(unit.unit_number.clone())
                } else {
                    error!("Database error inserting unit {}: {}", unit.unit_number, e);
                    DomainError::DatabaseError(e.to_string())
                }
            })?;

            if let Some(tenant) = tenant {
                sqlx::query(
                    r#"
                    INSERT INTO tenants (id, unit_id, name, phone, balance, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    "#,
                )
                .bind(tenant.id)
                .bind(unit.id)
                .bind(&tenant.name)
                .bind(&tenant.phone)
                .bind(-unit.rent_amount.amount())
                .bind(tenant.created_at)
                .execute(&mut *tx)
                .await
                .map_err(db_error("inserting initial tenant"))?;
            }
        }

        tx.commit().await.map_err(db_error("committing property"))?;

        info!("Property created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, property: &Property) -> Result<Property, DomainError> {
        let row: Option<PropertyRow> = sqlx::query_as(
            r#"
            UPDATE properties
            SET name = $3, location = $4, modified_at = $5
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, location, created_at, modified_at
            "#,
        )
        .bind(property.id)
        .bind(property.owner_id)
        .bind(&property.name)
        .bind(&property.location)
        .bind(property.modified_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("updating property"))?;

        row.map(Property::from).ok_or(DomainError::PropertyNotFound(property.id))
    }
}
