// ============================================================================
// Keja Core - Payment Entity
// File: crates/keja-core/src/domain/payment.rs
// Description: Immutable rent payment, the only input to the tenant ledger
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::Money;
use crate::error::DomainError;

/// Payment method enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    MobileMoney,
    BankTransfer,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::MobileMoney => "mobile_money",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Card => "card",
        }
    }

    /// Accepts the canonical names and the labels shown on the payment form.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Some(PaymentMethod::Cash),
            "mobile_money" | "mobile money" | "m-pesa" | "mpesa" => Some(PaymentMethod::MobileMoney),
            "bank_transfer" | "bank transfer" | "bank" => Some(PaymentMethod::BankTransfer),
            "card" => Some(PaymentMethod::Card),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::MobileMoney => "M-Pesa",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Card => "Card",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

/// Payment entity. Append-only: there is no update or delete path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub amount: Money,
    pub method: PaymentMethod,
    pub payment_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(
        tenant_id: Uuid,
        amount: Money,
        method: PaymentMethod,
        payment_date: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if !amount.is_positive() {
            return Err(DomainError::ValidationError(
                "Payment amount must be greater than zero".to_string(),
            ));
        }
        if !amount.is_entry_in_range() {
            return Err(DomainError::ValidationError(format!(
                "Payment amount cannot exceed {}",
                Money::MAX_ENTRY
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            tenant_id,
            amount,
            method,
            payment_date,
            created_at: Utc::now(),
        })
    }
}

/// Payment joined with the tenant, unit and property labels used by the
/// history table and receipts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEntry {
    pub payment: Payment,
    pub tenant_name: String,
    pub tenant_phone: String,
    pub unit_number: String,
    pub property_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_amount_rejected() {
        let tenant_id = Uuid::new_v4();
        for amount in [0, -500] {
            let result = Payment::new(tenant_id, Money::new(amount), PaymentMethod::Cash, Utc::now());
            assert!(matches!(result, Err(DomainError::ValidationError(_))));
        }
    }

    #[test]
    fn test_amount_above_ceiling_rejected() {
        let tenant_id = Uuid::new_v4();
        assert!(Payment::new(tenant_id, Money::MAX_ENTRY, PaymentMethod::Cash, Utc::now()).is_ok());

        for amount in [Money::MAX_ENTRY.amount() + 1, i64::MAX / 2 + 1, i64::MAX] {
            let result = Payment::new(tenant_id, Money::new(amount), PaymentMethod::Cash, Utc::now());
            assert!(matches!(result, Err(DomainError::ValidationError(_))));
        }
    }

    #[test]
    fn test_method_aliases() {
        assert_eq!(PaymentMethod::from_str("M-Pesa"), Some(PaymentMethod::MobileMoney));
        assert_eq!(PaymentMethod::from_str("Bank Transfer"), Some(PaymentMethod::BankTransfer));
        assert_eq!(PaymentMethod::from_str("CARD"), Some(PaymentMethod::Card));
        assert_eq!(PaymentMethod::from_str("cheque"), None);
        assert_eq!(PaymentMethod::MobileMoney.label(), "M-Pesa");
    }
}
