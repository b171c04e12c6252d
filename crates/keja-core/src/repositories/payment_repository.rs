//! Payment repository trait (port)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Money, Payment, PaymentEntry};
use crate::error::DomainError;

/// A stored payment and the tenant balance written alongside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedPayment {
    pub payment: Payment,
    pub balance: Money,
}

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Every payment on the owner's properties, former tenants included.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Payment>, DomainError>;

    /// Payments with display labels, newest first.
    async fn list_history(&self, owner_id: Uuid) -> Result<Vec<PaymentEntry>, DomainError>;

    async fn find_entry(&self, owner_id: Uuid, payment_id: Uuid) -> Result<Option<PaymentEntry>, DomainError>;
    async fn list_by_tenant(&self, tenant_id: Uuid) -> Result<Vec<Payment>, DomainError>;

    /// Inserts the payment and rewrites the tenant's cached balance from the
    /// full history, in one transaction.
    async fn append(&self, payment: &Payment) -> Result<RecordedPayment, DomainError>;
}
