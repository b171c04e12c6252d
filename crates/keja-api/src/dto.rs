// ============================================================================
// Keja API - DTOs
// File: crates/keja-api/src/dto.rs
// Description: Request payloads, query strings and response views
// ============================================================================

use axum::extract::{FromRequest, Request};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use keja_core::domain::{MaintenanceStatus, Money, PaymentMethod};
use keja_core::ledger::{Standing, TenantLedger};
use keja_core::reports::{ArrearsEntry, MonthlyTotal, ReportSummary};

use crate::error::ApiError;

/// JSON body that has passed `validator` checks
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        value
            .validate()
            .map_err(|errors| ApiError::Validation(errors.to_string()))?;
        Ok(ValidatedJson(value))
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePropertyRequest {
    #[validate(length(min = 2, max = 100, message = "Property name must be between 2 and 100 characters"))]
    pub name: String,
    #[validate(length(min = 2, max = 200, message = "Location must be between 2 and 200 characters"))]
    pub location: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UnitsQuery {
    pub property_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TenantsQuery {
    pub property_id: Option<Uuid>,
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RecordPaymentRequest {
    pub tenant_id: Uuid,
    #[validate(range(min = 1i64, max = 1_000_000_000_000i64, message = "Payment amount must be between 1 and 1,000,000,000,000"))]
    pub amount: i64,
    /// Canonical name or form label, e.g. "mobile_money" or "M-Pesa"
    #[validate(length(min = 1, message = "Payment method is required"))]
    pub method: String,
    /// Defaults to now
    pub payment_date: Option<DateTime<Utc>>,
}

impl RecordPaymentRequest {
    pub fn method(&self) -> Result<PaymentMethod, ApiError> {
        PaymentMethod::from_str(&self.method)
            .ok_or_else(|| ApiError::Validation(format!("Unknown payment method '{}'", self.method)))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TopDebtorsQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMaintenanceRequest {
    pub unit_id: Uuid,
    #[validate(length(min = 3, max = 2000, message = "Description must be between 3 and 2000 characters"))]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AdvanceMaintenanceRequest {
    pub status: MaintenanceStatus,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct LedgerView {
    pub rent: Money,
    pub total_paid: Money,
    /// total_paid - rent; negative means arrears
    pub balance: Money,
    pub amount_owed: Money,
    pub standing: Standing,
}

impl From<&TenantLedger> for LedgerView {
    fn from(ledger: &TenantLedger) -> Self {
        Self {
            rent: ledger.rent,
            total_paid: ledger.total_paid,
            balance: ledger.balance,
            amount_owed: ledger.arrears(),
            standing: ledger.standing(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MonthlyView {
    /// "2024-01"
    pub month: String,
    /// "January 2024"
    pub label: String,
    pub transaction_count: usize,
    pub total_amount: Money,
}

impl From<&MonthlyTotal> for MonthlyView {
    fn from(row: &MonthlyTotal) -> Self {
        Self {
            month: row.month.to_string(),
            label: row.month.label(),
            transaction_count: row.transaction_count,
            total_amount: row.total_amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DebtorView {
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub unit_number: String,
    pub property_name: String,
    pub ledger: LedgerView,
}

impl From<&ArrearsEntry> for DebtorView {
    fn from(entry: &ArrearsEntry) -> Self {
        Self {
            tenant_id: entry.tenant_id,
            tenant_name: entry.tenant_name.clone(),
            unit_number: entry.unit_number.clone(),
            property_name: entry.property_name.clone(),
            ledger: LedgerView::from(&entry.ledger),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryView {
    pub currency: String,
    pub total_income: Money,
    pub total_arrears: Money,
    pub total_credit: Money,
    pub debtor_count: usize,
    pub total_units: usize,
    pub occupied_units: usize,
    pub occupancy_rate: f64,
    pub occupancy_percent: u32,
}

impl SummaryView {
    pub fn new(summary: &ReportSummary, currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
            total_income: summary.total_income,
            total_arrears: summary.total_arrears,
            total_credit: summary.total_credit,
            debtor_count: summary.debtor_count,
            total_units: summary.occupancy.total_units,
            occupied_units: summary.occupancy.occupied_units,
            occupancy_rate: summary.occupancy.rate,
            occupancy_percent: summary.occupancy.percent(),
        }
    }
}
