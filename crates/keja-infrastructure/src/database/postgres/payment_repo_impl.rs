// ============================================================================
// Keja Infrastructure - PostgreSQL Payment Repository
// File: crates/keja-infrastructure/src/database/postgres/payment_repo_impl.rs
// Description: Append-only payment store; every insert rewrites the tenant's
//              cached balance from the full history in the same transaction
// ============================================================================

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use keja_core::domain::{Money, Payment, PaymentEntry};
use keja_core::error::DomainError;
use keja_core::ledger;
use keja_core::repositories::{PaymentRepository, RecordedPayment};

use super::db_error;
use super::rows::{convert_all, PaymentEntryRow, PaymentRow};

const ENTRY_SELECT: &str = r#"
    SELECT
        pm.id, pm.tenant_id, pm.amount, pm.method, pm.payment_date, pm.created_at,
        t.name AS tenant_name, t.phone AS tenant_phone,
        u.unit_number,
        p.name AS property_name
    FROM payments pm
    JOIN tenants t ON t.id = pm.tenant_id
    JOIN units u ON u.id = t.unit_id
    JOIN properties p ON p.id = u.property_id
"#;

pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(
            r#"
            SELECT pm.id, pm.tenant_id, pm.amount, pm.method, pm.payment_date, pm.created_at
            FROM payments pm
            JOIN tenants t ON t.id = pm.tenant_id
            JOIN units u ON u.id = t.unit_id
            JOIN properties p ON p.id = u.property_id
            WHERE p.user_id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing payments"))?;

        convert_all(rows)
    }

    async fn list_history(&self, owner_id: Uuid) -> Result<Vec<PaymentEntry>, DomainError> {
        let sql = format!(
            "{} WHERE p.user_id = $1 ORDER BY pm.payment_date DESC, pm.created_at DESC",
            ENTRY_SELECT
        );
        let rows: Vec<PaymentEntryRow> = sqlx::query_as(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing payment history"))?;

        convert_all(rows)
    }

    async fn find_entry(&self, owner_id: Uuid, payment_id: Uuid) -> Result<Option<PaymentEntry>, DomainError> {
        let sql = format!("{} WHERE pm.id = $1 AND p.user_id = $2", ENTRY_SELECT);
        let row: Option<PaymentEntryRow> = sqlx::query_as(&sql)
            .bind(payment_id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding payment"))?;

        row.map(PaymentEntry::try_from).transpose()
    }

    async fn list_by_tenant(&self, tenant_id: Uuid) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, amount, method, payment_date, created_at
            FROM payments
            WHERE tenant_id = $1
            ORDER BY payment_date DESC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing tenant payments"))?;

        convert_all(rows)
    }

    async fn append(&self, payment: &Payment) -> Result<RecordedPayment, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("starting payment transaction"))?;

        // Lock the tenant so concurrent payments serialize on the cache write.
        let rent: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT u.rent_amount
            FROM tenants t
            JOIN units u ON u.id = t.unit_id
            WHERE t.id = $1 AND t.removed_at IS NULL
            FOR UPDATE OF t
            "#,
        )
        .bind(payment.tenant_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("locking tenant"))?;

        let rent = match rent {
            Some(rent) => Money::new(rent),
            None => {
                warn!("Payment for missing tenant {}", payment.tenant_id);
                return Err(DomainError::TenantNotFound(payment.tenant_id));
            }
        };

        let inserted: PaymentRow = sqlx::query_as(
            r#"
            INSERT INTO payments (id, tenant_id, amount, method, payment_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, tenant_id, amount, method, payment_date, created_at
            "#,
        )
        .bind(payment.id)
        .bind(payment.tenant_id)
        .bind(payment.amount.amount())
        .bind(payment.method.as_str())
        .bind(payment.payment_date)
        .bind(payment.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("inserting payment"))?;

        let history_rows: Vec<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, tenant_id, amount, method, payment_date, created_at
            FROM payments
            WHERE tenant_id = $1
            "#,
        )
        .bind(payment.tenant_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(db_error("reading payment history"))?;
        let history: Vec<Payment> = convert_all(history_rows)?;

        let balance = ledger::compute_balance(rent, &history);

        sqlx::query("UPDATE tenants SET balance = $2 WHERE id = $1")
            .bind(payment.tenant_id)
            .bind(balance.amount())
            .execute(&mut *tx)
            .await
            .map_err(db_error("refreshing tenant balance"))?;

        tx.commit().await.map_err(db_error("committing payment"))?;

        info!("Payment {} stored, tenant {} balance {}", inserted.id, payment.tenant_id, balance);
        Ok(RecordedPayment {
            payment: inserted.try_into()?,
            balance,
        })
    }
}
