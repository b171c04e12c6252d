// ============================================================================
// Keja Core - Payment Recorder
// File: crates/keja-core/src/services/payment_recorder.rs
// ============================================================================
//! The single write path that affects a tenant's ledger, plus the read-side
//! views built on payments: history, receipts and per-tenant ledgers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use keja_shared::constants::RECEIPT_BRAND;

use crate::domain::{Money, Payment, PaymentEntry, PaymentMethod, Session};
use crate::error::DomainError;
use crate::ledger::{self, TenantLedger};
use crate::repositories::{PaymentRepository, RecordedPayment, TenantRepository};

/// Printable receipt for one payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub brand: String,
    pub payment_id: Uuid,
    pub payment_date: DateTime<Utc>,
    pub tenant_name: String,
    pub tenant_phone: String,
    pub unit_number: String,
    pub property_name: String,
    pub amount: Money,
    pub method: PaymentMethod,
    pub method_label: String,
    pub currency: String,
}

impl Receipt {
    fn from_entry(entry: PaymentEntry, currency: &str) -> Self {
        Self {
            brand: RECEIPT_BRAND.to_string(),
            payment_id: entry.payment.id,
            payment_date: entry.payment.payment_date,
            tenant_name: entry.tenant_name,
            tenant_phone: entry.tenant_phone,
            unit_number: entry.unit_number,
            property_name: entry.property_name,
            amount: entry.payment.amount,
            method: entry.payment.method,
            method_label: entry.payment.method.label().to_string(),
            currency: currency.to_string(),
        }
    }

    /// "KES 15,000"
    pub fn amount_display(&self) -> String {
        self.amount.display_with(&self.currency)
    }
}

pub struct PaymentRecorder {
    tenant_repo: Arc<dyn TenantRepository>,
    payment_repo: Arc<dyn PaymentRepository>,
    currency: String,
}

impl PaymentRecorder {
    pub fn new(
        tenant_repo: Arc<dyn TenantRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
        currency: String,
    ) -> Self {
        Self {
            tenant_repo,
            payment_repo,
            currency,
        }
    }

    /// Records a payment for an active tenant of the session user.
    /// `timestamp` defaults to now.
    pub async fn record_payment(
        &self,
        session: &Session,
        tenant_id: Uuid,
        amount: Money,
        method: PaymentMethod,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<RecordedPayment, DomainError> {
        let payment = Payment::new(tenant_id, amount, method, timestamp.unwrap_or_else(Utc::now)).map_err(|e| {
            warn!("Rejected payment for tenant {}: {}", tenant_id, e);
            e
        })?;

        self.tenant_repo
            .find_active(session.user_id, tenant_id)
            .await?
            .ok_or_else(|| {
                warn!("Payment for unknown tenant {} by user {}", tenant_id, session.user_id);
                DomainError::TenantNotFound(tenant_id)
            })?;

        let recorded = self.payment_repo.append(&payment).await.map_err(|e| {
            error!("Failed to record payment for tenant {}: {}", tenant_id, e);
            e
        })?;

        info!(
            "Recorded payment {} of {} for tenant {} (balance {})",
            recorded.payment.id, recorded.payment.amount, tenant_id, recorded.balance
        );
        Ok(recorded)
    }

    /// Payment history, newest first.
    pub async fn history(&self, session: &Session) -> Result<Vec<PaymentEntry>, DomainError> {
        self.payment_repo.list_history(session.user_id).await
    }

    pub async fn receipt(&self, session: &Session, payment_id: Uuid) -> Result<Receipt, DomainError> {
        let entry = self
            .payment_repo
            .find_entry(session.user_id, payment_id)
            .await?
            .ok_or(DomainError::PaymentNotFound(payment_id))?;

        Ok(Receipt::from_entry(entry, &self.currency))
    }

    /// Ledger derived from the tenant's full payment history.
    pub async fn tenant_ledger(&self, session: &Session, tenant_id: Uuid) -> Result<TenantLedger, DomainError> {
        let record = self
            .tenant_repo
            .find_active(session.user_id, tenant_id)
            .await?
            .ok_or(DomainError::TenantNotFound(tenant_id))?;

        let payments = self.payment_repo.list_by_tenant(tenant_id).await?;
        ledger::summarize(tenant_id, record.rent_amount, &payments)
    }
}
