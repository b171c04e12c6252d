//! # Tenant ledger
//!
//! The single place where a tenant's balance is computed. Every endpoint
//! that shows a balance, an arrears figure, or a debtor list goes through
//! these functions.
//!
//! Sign convention: `balance = total_paid - rent`. A positive balance is
//! credit (overpaid), a negative balance is arrears (owed). Display code that
//! wants "amount owed" as a positive figure uses [`TenantLedger::arrears`].
//!
//! The persisted `tenants.balance` column is a cache written from
//! [`compute_balance`] inside the payment transaction; nothing here reads it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Money, Payment};
use crate::error::DomainError;

/// Sum of payment amounts. Order-independent.
pub fn total_paid<'a, I>(payments: I) -> Money
where
    I: IntoIterator<Item = &'a Payment>,
{
    payments.into_iter().map(|p| p.amount).sum()
}

/// `sum(payments) - rent`. `payments` must be the complete history of one tenant.
pub fn compute_balance(rent: Money, payments: &[Payment]) -> Money {
    total_paid(payments) - rent
}

/// Ledger summary for one tenant. See [`TenantLedger::from_history`].
pub fn summarize(tenant_id: Uuid, rent: Money, payments: &[Payment]) -> Result<TenantLedger, DomainError> {
    TenantLedger::from_history(tenant_id, rent, payments)
}

/// Where a tenant stands after applying the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "amount")]
pub enum Standing {
    Arrears(Money),
    Cleared,
    Credit(Money),
}

/// Derived ledger figures for one tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantLedger {
    pub tenant_id: Uuid,
    pub rent: Money,
    pub total_paid: Money,
    pub balance: Money,
}

impl TenantLedger {
    /// Builds the ledger from a tenant's payment history, refusing histories
    /// that contain another tenant's payments.
    pub fn from_history(tenant_id: Uuid, rent: Money, payments: &[Payment]) -> Result<Self, DomainError> {
        if let Some(stray) = payments.iter().find(|p| p.tenant_id != tenant_id) {
            return Err(DomainError::ConsistencyError(format!(
                "Payment {} belongs to tenant {}, not {}",
                stray.id, stray.tenant_id, tenant_id
            )));
        }

        let total_paid = total_paid(payments);
        Ok(Self {
            tenant_id,
            rent,
            total_paid,
            balance: total_paid - rent,
        })
    }

    pub fn standing(&self) -> Standing {
        if self.balance.is_negative() {
            Standing::Arrears(self.balance.abs())
        } else if self.balance.is_positive() {
            Standing::Credit(self.balance)
        } else {
            Standing::Cleared
        }
    }

    /// Amount owed as a non-negative figure.
    pub fn arrears(&self) -> Money {
        if self.balance.is_negative() {
            self.balance.abs()
        } else {
            Money::ZERO
        }
    }

    /// Amount overpaid as a non-negative figure.
    pub fn credit(&self) -> Money {
        if self.balance.is_positive() {
            self.balance
        } else {
            Money::ZERO
        }
    }

    pub fn is_debtor(&self) -> bool {
        self.balance.is_negative()
    }
}
