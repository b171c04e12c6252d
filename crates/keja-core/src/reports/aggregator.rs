// ============================================================================
// Keja Core - Report Aggregation
// File: crates/keja-core/src/reports/aggregator.rs
// Description: Pure folds from payments, tenants and units into report rows
// ============================================================================

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{Datelike, Month};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Money, Payment, TenantRecord, Unit};
use crate::error::DomainError;
use crate::ledger::{self, TenantLedger};

/// Calendar month of a payment date (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(payment: &Payment) -> Self {
        Self {
            year: payment.payment_date.year(),
            month: payment.payment_date.month(),
        }
    }

    /// "January 2024"
    pub fn label(&self) -> String {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("Unknown");
        format!("{} {}", name, self.year)
    }
}

impl fmt::Display for MonthKey {
    /// "2024-01"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: MonthKey,
    pub transaction_count: usize,
    pub total_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrearsEntry {
    pub tenant_id: Uuid,
    pub tenant_name: String,
    pub unit_number: String,
    pub property_name: String,
    pub ledger: TenantLedger,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Occupancy {
    pub total_units: usize,
    pub occupied_units: usize,
    /// occupied / total, 0.0 when there are no units
    pub rate: f64,
}

impl Occupancy {
    /// Rounded whole percentage, as shown on the reports page.
    pub fn percent(&self) -> u32 {
        (self.rate * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyStats {
    pub property_id: Uuid,
    pub total_units: usize,
    pub occupied_units: usize,
    /// Sum of unit rents, i.e. expected income when fully collected
    pub expected_rent: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_income: Money,
    pub occupancy: Occupancy,
    pub total_arrears: Money,
    pub total_credit: Money,
    pub debtor_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub property_count: usize,
    pub occupied_units: usize,
    pub total_collected: Money,
    pub total_arrears: Money,
}

pub fn total_income(payments: &[Payment]) -> Money {
    ledger::total_paid(payments)
}

/// Groups payments by calendar month, newest month first.
pub fn monthly_report(payments: &[Payment]) -> Vec<MonthlyTotal> {
    let mut months: BTreeMap<MonthKey, (usize, Money)> = BTreeMap::new();
    for payment in payments {
        let entry = months.entry(MonthKey::of(payment)).or_insert((0, Money::ZERO));
        entry.0 += 1;
        entry.1 += payment.amount;
    }

    months
        .into_iter()
        .rev()
        .map(|(month, (transaction_count, total_amount))| MonthlyTotal {
            month,
            transaction_count,
            total_amount,
        })
        .collect()
}

/// One ledger row per tenant, ordered by tenant name. Payments of tenants
/// outside `tenants` (e.g. former tenants) are ignored here but still count
/// toward [`total_income`].
pub fn arrears_report(tenants: &[TenantRecord], payments: &[Payment]) -> Result<Vec<ArrearsEntry>, DomainError> {
    let mut by_tenant: HashMap<Uuid, Vec<Payment>> = HashMap::new();
    for payment in payments {
        by_tenant.entry(payment.tenant_id).or_default().push(payment.clone());
    }

    let mut entries = tenants
        .iter()
        .map(|record| {
            let history = by_tenant
                .get(&record.tenant.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let ledger = ledger::summarize(record.tenant.id, record.rent_amount, history)?;
            Ok(ArrearsEntry {
                tenant_id: record.tenant.id,
                tenant_name: record.tenant.name.clone(),
                unit_number: record.unit_number.clone(),
                property_name: record.property_name.clone(),
                ledger,
            })
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    entries.sort_by(|a, b| a.tenant_name.cmp(&b.tenant_name).then(a.tenant_id.cmp(&b.tenant_id)));
    Ok(entries)
}

/// Tenants with a negative balance, largest amount owed first.
pub fn top_debtors(entries: &[ArrearsEntry], limit: Option<usize>) -> Vec<ArrearsEntry> {
    let mut debtors: Vec<ArrearsEntry> = entries
        .iter()
        .filter(|e| e.ledger.is_debtor())
        .cloned()
        .collect();

    debtors.sort_by(|a, b| {
        b.ledger
            .arrears()
            .cmp(&a.ledger.arrears())
            .then_with(|| a.tenant_name.cmp(&b.tenant_name))
            .then_with(|| a.tenant_id.cmp(&b.tenant_id))
    });

    if let Some(limit) = limit {
        debtors.truncate(limit);
    }
    debtors
}

pub fn total_arrears(entries: &[ArrearsEntry]) -> Money {
    entries.iter().map(|e| e.ledger.arrears()).sum()
}

/// Occupancy over the full unit population, vacant units included.
pub fn occupancy(units: &[Unit]) -> Occupancy {
    let total_units = units.len();
    let occupied_units = units.iter().filter(|u| u.is_occupied()).count();
    let rate = if total_units == 0 {
        0.0
    } else {
        occupied_units as f64 / total_units as f64
    };

    Occupancy {
        total_units,
        occupied_units,
        rate,
    }
}

pub fn occupancy_rate(units: &[Unit]) -> f64 {
    occupancy(units).rate
}

/// Per-property unit counts and expected rent, one row per property id seen.
pub fn property_stats(property_ids: &[Uuid], units: &[Unit]) -> Vec<PropertyStats> {
    property_ids
        .iter()
        .map(|&property_id| {
            let owned: Vec<&Unit> = units.iter().filter(|u| u.property_id == property_id).collect();
            PropertyStats {
                property_id,
                total_units: owned.len(),
                occupied_units: owned.iter().filter(|u| u.is_occupied()).count(),
                expected_rent: owned.iter().map(|u| u.rent_amount).sum(),
            }
        })
        .collect()
}

pub fn summarize(units: &[Unit], entries: &[ArrearsEntry], payments: &[Payment]) -> ReportSummary {
    ReportSummary {
        total_income: total_income(payments),
        occupancy: occupancy(units),
        total_arrears: total_arrears(entries),
        total_credit: entries.iter().map(|e| e.ledger.credit()).sum(),
        debtor_count: entries.iter().filter(|e| e.ledger.is_debtor()).count(),
    }
}

pub fn dashboard(property_count: usize, units: &[Unit], entries: &[ArrearsEntry], payments: &[Payment]) -> DashboardStats {
    DashboardStats {
        property_count,
        occupied_units: units.iter().filter(|u| u.is_occupied()).count(),
        total_collected: total_income(payments),
        total_arrears: total_arrears(entries),
    }
}
