// ============================================================================
// Keja Infrastructure - Row Types
// File: crates/keja-infrastructure/src/database/postgres/rows.rs
// Description: SQLx row shapes and their validation into domain records
// ============================================================================
//! Stored enum columns are parsed strictly: an unknown value is a
//! `ConsistencyError`, never a default.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use keja_core::domain::{
    MaintenanceEntry, MaintenanceRequest, MaintenanceStatus, Money, Payment, PaymentEntry, PaymentMethod, Profile,
    Property, Tenant, TenantRecord, Unit, UnitOccupancy, UnitStatus,
};
use keja_core::error::DomainError;

fn unknown(column: &str, value: &str) -> DomainError {
    DomainError::ConsistencyError(format!("Unknown {} value '{}'", column, value))
}

#[derive(Debug, FromRow)]
pub(crate) struct PropertyRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<PropertyRow> for Property {
    fn from(row: PropertyRow) -> Self {
        Property {
            id: row.id,
            owner_id: row.user_id,
            name: row.name,
            location: row.location,
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct UnitRow {
    pub id: Uuid,
    pub property_id: Uuid,
    pub unit_number: String,
    pub rent_amount: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UnitRow> for Unit {
    type Error = DomainError;

    fn try_from(row: UnitRow) -> Result<Self, Self::Error> {
        let status = UnitStatus::from_str(&row.status).ok_or_else(|| unknown("unit status", &row.status))?;
        Ok(Unit {
            id: row.id,
            property_id: row.property_id,
            unit_number: row.unit_number,
            rent_amount: Money::new(row.rent_amount),
            status,
            created_at: row.created_at,
        })
    }
}

/// Unit LEFT JOIN its active tenant
#[derive(Debug, FromRow)]
pub(crate) struct UnitOccupancyRow {
    #[sqlx(flatten)]
    pub unit: UnitRow,
    pub property_name: String,
    pub tenant_id: Option<Uuid>,
    pub tenant_name: Option<String>,
    pub tenant_phone: Option<String>,
    pub tenant_created_at: Option<DateTime<Utc>>,
    pub tenant_modified_at: Option<DateTime<Utc>>,
}

impl TryFrom<UnitOccupancyRow> for UnitOccupancy {
    type Error = DomainError;

    fn try_from(row: UnitOccupancyRow) -> Result<Self, Self::Error> {
        let unit = Unit::try_from(row.unit)?;
        let tenant = match (row.tenant_id, row.tenant_name, row.tenant_phone, row.tenant_created_at) {
            (Some(id), Some(name), Some(phone), Some(created_at)) => Some(Tenant {
                id,
                unit_id: unit.id,
                name,
                phone,
                created_at,
                modified_at: row.tenant_modified_at,
                removed_at: None,
            }),
            (None, _, _, _) => None,
            (Some(id), _, _, _) => {
                return Err(DomainError::ConsistencyError(format!("Tenant {} row is incomplete", id)));
            }
        };

        Ok(UnitOccupancy {
            unit,
            property_name: row.property_name,
            tenant,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct TenantRow {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl From<TenantRow> for Tenant {
    fn from(row: TenantRow) -> Self {
        Tenant {
            id: row.id,
            unit_id: row.unit_id,
            name: row.name,
            phone: row.phone,
            created_at: row.created_at,
            modified_at: row.modified_at,
            removed_at: row.removed_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct TenantRecordRow {
    #[sqlx(flatten)]
    pub tenant: TenantRow,
    pub unit_number: String,
    pub rent_amount: i64,
    pub property_id: Uuid,
    pub property_name: String,
}

impl From<TenantRecordRow> for TenantRecord {
    fn from(row: TenantRecordRow) -> Self {
        TenantRecord {
            tenant: row.tenant.into(),
            unit_number: row.unit_number,
            rent_amount: Money::new(row.rent_amount),
            property_id: row.property_id,
            property_name: row.property_name,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct PaymentRow {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub amount: i64,
    pub method: String,
    pub payment_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let method = match row.method.as_str() {
            "cash" => PaymentMethod::Cash,
            "mobile_money" => PaymentMethod::MobileMoney,
            "bank_transfer" => PaymentMethod::BankTransfer,
            "card" => PaymentMethod::Card,
            other => return Err(unknown("payment method", other)),
        };
        Ok(Payment {
            id: row.id,
            tenant_id: row.tenant_id,
            amount: Money::new(row.amount),
            method,
            payment_date: row.payment_date,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct PaymentEntryRow {
    #[sqlx(flatten)]
    pub payment: PaymentRow,
    pub tenant_name: String,
    pub tenant_phone: String,
    pub unit_number: String,
    pub property_name: String,
}

impl TryFrom<PaymentEntryRow> for PaymentEntry {
    type Error = DomainError;

    fn try_from(row: PaymentEntryRow) -> Result<Self, Self::Error> {
        Ok(PaymentEntry {
            payment: row.payment.try_into()?,
            tenant_name: row.tenant_name,
            tenant_phone: row.tenant_phone,
            unit_number: row.unit_number,
            property_name: row.property_name,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct MaintenanceRow {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl TryFrom<MaintenanceRow> for MaintenanceRequest {
    type Error = DomainError;

    fn try_from(row: MaintenanceRow) -> Result<Self, Self::Error> {
        let status =
            MaintenanceStatus::from_str(&row.status).ok_or_else(|| unknown("maintenance status", &row.status))?;
        Ok(MaintenanceRequest {
            id: row.id,
            unit_id: row.unit_id,
            description: row.description,
            status,
            created_at: row.created_at,
            modified_at: row.modified_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct MaintenanceEntryRow {
    #[sqlx(flatten)]
    pub request: MaintenanceRow,
    pub unit_number: String,
    pub property_name: String,
    pub tenant_name: Option<String>,
}

impl TryFrom<MaintenanceEntryRow> for MaintenanceEntry {
    type Error = DomainError;

    fn try_from(row: MaintenanceEntryRow) -> Result<Self, Self::Error> {
        Ok(MaintenanceEntry {
            request: row.request.try_into()?,
            unit_number: row.unit_number,
            property_name: row.property_name,
            tenant_name: row.tenant_name,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct ProfileRow {
    pub id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    pub commission_rate: i32,
    pub agency_mode: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            full_name: row.full_name,
            phone: row.phone,
            commission_rate: row.commission_rate,
            agency_mode: row.agency_mode,
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

/// Converts a batch of rows, failing on the first inconsistent one.
pub(crate) fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, DomainError>
where
    T: TryFrom<R, Error = DomainError>,
{
    rows.into_iter().map(T::try_from).collect()
}
