//! PostgreSQL maintenance request repository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use keja_core::domain::{MaintenanceEntry, MaintenanceRequest, MaintenanceStatus};
use keja_core::error::DomainError;
use keja_core::repositories::MaintenanceRepository;

use super::db_error;
use super::rows::{convert_all, MaintenanceEntryRow, MaintenanceRow};

pub struct PgMaintenanceRepository {
    pool: PgPool,
}

impl PgMaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaintenanceRepository for PgMaintenanceRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<MaintenanceEntry>, DomainError> {
        let rows: Vec<MaintenanceEntryRow> = sqlx::query_as(
            r#"
            SELECT
                m.id, m.unit_id, m.description, m.status, m.created_at, m.modified_at,
                u.unit_number,
                p.name AS property_name,
                t.name AS tenant_name
            FROM maintenance_requests m
            JOIN units u ON u.id = m.unit_id
            JOIN properties p ON p.id = u.property_id
            LEFT JOIN tenants t ON t.unit_id = u.id AND t.removed_at IS NULL
            WHERE p.user_id = $1
            ORDER BY m.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing maintenance requests"))?;

        convert_all(rows)
    }

    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Option<MaintenanceRequest>, DomainError> {
        let row: Option<MaintenanceRow> = sqlx::query_as(
            r#"
            SELECT m.id, m.unit_id, m.description, m.status, m.created_at, m.modified_at
            FROM maintenance_requests m
            JOIN units u ON u.id = m.unit_id
            JOIN properties p ON p.id = u.property_id
            WHERE m.id = $1 AND p.user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding maintenance request"))?;

        row.map(MaintenanceRequest::try_from).transpose()
    }

    async fn create(&self, request: &MaintenanceRequest) -> Result<MaintenanceRequest, DomainError> {
        let row: MaintenanceRow = sqlx::query_as(
            r#"
            INSERT INTO maintenance_requests (id, unit_id, description, status, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, unit_id, description, status, created_at, modified_at
            "#,
        )
        .bind(request.id)
        .bind(request.unit_id)
        .bind(&request.description)
        .bind(request.status.as_str())
        .bind(request.created_at)
        .bind(request.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating maintenance request"))?;

        info!("Maintenance request created: {}", row.id);
        row.try_into()
    }

    async fn update_status(
        &self,
        request: &MaintenanceRequest,
        expected: MaintenanceStatus,
    ) -> Result<MaintenanceRequest, DomainError> {
        let row: Option<MaintenanceRow> = sqlx::query_as(
            r#"
            UPDATE maintenance_requests
            SET status = $2, modified_at = $3
            WHERE id = $1 AND status = $4
            RETURNING id, unit_id, description, status, created_at, modified_at
            "#,
        )
        .bind(request.id)
        .bind(request.status.as_str())
        .bind(request.modified_at)
        .bind(expected.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("updating maintenance status"))?;

        match row {
            Some(row) => row.try_into(),
            None => Err(DomainError::InvalidStatusTransition {
                from: expected.as_str().to_string(),
                to: request.status.as_str().to_string(),
            }),
        }
    }
}
