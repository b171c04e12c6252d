// ============================================================================
// Keja Core - CSV Export
// File: crates/keja-core/src/reports/export.rs
// Description: Renders report rows as downloadable CSV documents
// ============================================================================

use serde::Serialize;

use super::aggregator::{ArrearsEntry, MonthlyTotal};
use crate::error::DomainError;

#[derive(Serialize)]
struct MonthlyRow<'a> {
    #[serde(rename = "Month")]
    month: &'a str,
    #[serde(rename = "Transactions")]
    transactions: usize,
    #[serde(rename = "Amount")]
    amount: i64,
}

#[derive(Serialize)]
struct ArrearsRow<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Unit")]
    unit: &'a str,
    #[serde(rename = "Arrears")]
    arrears: i64,
}

const MONTHLY_HEADERS: [&str; 3] = ["Month", "Transactions", "Amount"];
const ARREARS_HEADERS: [&str; 3] = ["Name", "Unit", "Arrears"];

/// `Month,Transactions,Amount`, one row per month in report order.
pub fn monthly_report_csv(rows: &[MonthlyTotal]) -> Result<Vec<u8>, DomainError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    writer.write_record(MONTHLY_HEADERS).map_err(export_error)?;

    for row in rows {
        let label = row.month.label();
        writer
            .serialize(MonthlyRow {
                month: &label,
                transactions: row.transaction_count,
                amount: row.total_amount.amount(),
            })
            .map_err(export_error)?;
    }

    finish(writer)
}

/// `Name,Unit,Arrears` for every debtor, arrears as a positive amount.
pub fn arrears_report_csv(debtors: &[ArrearsEntry]) -> Result<Vec<u8>, DomainError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    writer.write_record(ARREARS_HEADERS).map_err(export_error)?;

    for entry in debtors.iter().filter(|e| e.ledger.is_debtor()) {
        writer
            .serialize(ArrearsRow {
                name: &entry.tenant_name,
                unit: &entry.unit_number,
                arrears: entry.ledger.arrears().amount(),
            })
            .map_err(export_error)?;
    }

    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, DomainError> {
    writer
        .into_inner()
        .map_err(|e| DomainError::ExportError(e.to_string()))
}

fn export_error(e: csv::Error) -> DomainError {
    DomainError::ExportError(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Money, Payment, PaymentMethod, Tenant, TenantContact, TenantRecord};
    use crate::reports::aggregator::{arrears_report, monthly_report};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn test_empty_exports_are_header_only() {
        let monthly = String::from_utf8(monthly_report_csv(&[]).unwrap()).unwrap();
        assert_eq!(monthly, "Month,Transactions,Amount\n");

        let arrears = String::from_utf8(arrears_report_csv(&[]).unwrap()).unwrap();
        assert_eq!(arrears, "Name,Unit,Arrears\n");
    }

    #[test]
    fn test_monthly_csv() {
        let tenant = Uuid::new_v4();
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let payments = vec![
            Payment::new(tenant, Money::new(1000), PaymentMethod::Cash, date).unwrap(),
            Payment::new(tenant, Money::new(2000), PaymentMethod::Card, date).unwrap(),
        ];

        let csv = String::from_utf8(monthly_report_csv(&monthly_report(&payments)).unwrap()).unwrap();
        assert_eq!(csv, "Month,Transactions,Amount\nJanuary 2024,2,3000\n");
    }

    #[test]
    fn test_arrears_csv_quotes_and_skips_non_debtors() {
        let owing = TenantRecord {
            tenant: Tenant::new(Uuid::new_v4(), TenantContact::new("Otieno, Peter", "0711111111").unwrap()),
            unit_number: "B3".to_string(),
            rent_amount: Money::new(12000),
            property_id: Uuid::new_v4(),
            property_name: "Hill View".to_string(),
        };
        let paid_up = TenantRecord {
            tenant: Tenant::new(Uuid::new_v4(), TenantContact::new("Zawadi", "0722222222").unwrap()),
            unit_number: "B4".to_string(),
            rent_amount: Money::ZERO,
            property_id: owing.property_id,
            property_name: "Hill View".to_string(),
        };

        let entries = arrears_report(&[owing, paid_up], &[]).unwrap();
        let csv = String::from_utf8(arrears_report_csv(&entries).unwrap()).unwrap();
        assert_eq!(csv, "Name,Unit,Arrears\n\"Otieno, Peter\",B3,12000\n");
    }
}
