// ============================================================================
// Keja Core - Tenancy Service
// File: crates/keja-core/src/services/tenancy_service.rs
// Description: Unit occupancy lifecycle and the tenant directory
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{Payment, Session, Tenant, TenantContact, TenantRecord, UnitOccupancy};
use crate::error::DomainError;
use crate::ledger::{self, TenantLedger};
use crate::repositories::{PaymentRepository, TenantRepository, UnitRepository};

/// Directory row: the tenant, where they live, and their derived ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantSummary {
    #[serde(flatten)]
    pub record: TenantRecord,
    pub ledger: TenantLedger,
}

/// Optional narrowing of the tenant directory
#[derive(Debug, Clone, Default)]
pub struct TenantFilter {
    pub property_id: Option<Uuid>,
    pub query: Option<String>,
}

pub struct TenancyService {
    unit_repo: Arc<dyn UnitRepository>,
    tenant_repo: Arc<dyn TenantRepository>,
    payment_repo: Arc<dyn PaymentRepository>,
}

impl TenancyService {
    pub fn new(
        unit_repo: Arc<dyn UnitRepository>,
        tenant_repo: Arc<dyn TenantRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
    ) -> Self {
        Self {
            unit_repo,
            tenant_repo,
            payment_repo,
        }
    }

    pub async fn list_units(
        &self,
        session: &Session,
        property_id: Option<Uuid>,
    ) -> Result<Vec<UnitOccupancy>, DomainError> {
        let units = self.unit_repo.list_by_owner(session.user_id, property_id).await?;
        for row in &units {
            row.check_consistency()?;
        }
        Ok(units)
    }

    async fn owned_unit(&self, session: &Session, unit_id: Uuid) -> Result<UnitOccupancy, DomainError> {
        let row = self
            .unit_repo
            .find_by_id(session.user_id, unit_id)
            .await?
            .ok_or(DomainError::UnitNotFound(unit_id))?;
        row.check_consistency()?;
        Ok(row)
    }

    /// vacant → occupied with a new tenant.
    pub async fn occupy_unit(
        &self,
        session: &Session,
        unit_id: Uuid,
        contact: TenantContact,
    ) -> Result<Tenant, DomainError> {
        let mut row = self.owned_unit(session, unit_id).await?;
        row.unit.occupy().map_err(|e| {
            warn!("Occupy rejected for unit {}: {}", unit_id, e);
            e
        })?;

        let tenant = Tenant::new(unit_id, contact);
        self.unit_repo.occupy(unit_id, &tenant).await?;

        info!("Unit {} occupied by tenant {}", unit_id, tenant.id);
        Ok(tenant)
    }

    /// occupied → vacant. The tenant is soft-removed so past payments still
    /// count toward income.
    pub async fn vacate_unit(&self, session: &Session, unit_id: Uuid) -> Result<(), DomainError> {
        let mut row = self.owned_unit(session, unit_id).await?;
        row.unit.vacate().map_err(|e| {
            warn!("Vacate rejected for unit {}: {}", unit_id, e);
            e
        })?;

        let tenant = row.tenant.ok_or_else(|| {
            DomainError::ConsistencyError(format!("Unit {} has no tenant to remove", unit_id))
        })?;
        self.unit_repo.vacate(unit_id, tenant.id, Utc::now()).await?;

        info!("Unit {} vacated, tenant {} removed", unit_id, tenant.id);
        Ok(())
    }

    pub async fn update_tenant(
        &self,
        session: &Session,
        tenant_id: Uuid,
        contact: TenantContact,
    ) -> Result<Tenant, DomainError> {
        let mut tenant = self
            .tenant_repo
            .find_active(session.user_id, tenant_id)
            .await?
            .ok_or(DomainError::TenantNotFound(tenant_id))?
            .tenant;

        tenant.update_contact(contact);
        let updated = self.tenant_repo.update_contact(&tenant).await?;
        info!("Tenant {} contact updated", tenant_id);
        Ok(updated)
    }

    /// Deletes a vacant unit. Occupied units must be vacated first.
    pub async fn delete_unit(&self, session: &Session, unit_id: Uuid) -> Result<(), DomainError> {
        let row = self.owned_unit(session, unit_id).await?;
        if row.unit.is_occupied() {
            warn!("Refusing to delete occupied unit {}", unit_id);
            return Err(DomainError::UnitOccupied(row.unit.unit_number));
        }

        if !self.unit_repo.delete_vacant(unit_id).await? {
            return Err(DomainError::UnitOccupied(row.unit.unit_number));
        }

        info!("Unit {} deleted", unit_id);
        Ok(())
    }

    /// Active tenants with their ledgers, ordered by name.
    pub async fn list_tenants(&self, session: &Session, filter: &TenantFilter) -> Result<Vec<TenantSummary>, DomainError> {
        let records: Vec<TenantRecord> = self
            .tenant_repo
            .list_active_by_owner(session.user_id)
            .await?
            .into_iter()
            .filter(|r| filter.property_id.map_or(true, |p| r.property_id == p))
            .filter(|r| filter.query.as_deref().map_or(true, |q| r.matches_query(q)))
            .collect();

        if records.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_tenant: HashMap<Uuid, Vec<Payment>> = HashMap::new();
        for payment in self.payment_repo.list_by_owner(session.user_id).await? {
            by_tenant.entry(payment.tenant_id).or_default().push(payment);
        }

        let mut summaries = records
            .into_iter()
            .map(|record| {
                let history = by_tenant.get(&record.tenant.id).map(Vec::as_slice).unwrap_or(&[]);
                let ledger = ledger::summarize(record.tenant.id, record.rent_amount, history)?;
                Ok(TenantSummary { record, ledger })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        summaries.sort_by(|a, b| a.record.tenant.name.cmp(&b.record.tenant.name));
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Money, PaymentMethod, Unit};
    use crate::repositories::{MockPaymentRepository, MockTenantRepository, MockUnitRepository};

    fn vacant_row() -> UnitOccupancy {
        UnitOccupancy {
            unit: Unit::new(Uuid::new_v4(), "A1".to_string(), Money::new(15000)).unwrap(),
            property_name: "Sunrise Court".to_string(),
            tenant: None,
        }
    }

    fn occupied_row() -> UnitOccupancy {
        let mut row = vacant_row();
        row.unit.occupy().unwrap();
        row.tenant = Some(Tenant::new(row.unit.id, contact("Jane Wanjiku")));
        row
    }

    fn contact(name: &str) -> TenantContact {
        TenantContact::new(name, "0712345678").unwrap()
    }

    fn record(name: &str, property_id: Uuid) -> TenantRecord {
        TenantRecord {
            tenant: Tenant::new(Uuid::new_v4(), contact(name)),
            unit_number: "A1".to_string(),
            rent_amount: Money::new(10000),
            property_id,
            property_name: "Sunrise Court".to_string(),
        }
    }

    fn service(units: MockUnitRepository, tenants: MockTenantRepository, payments: MockPaymentRepository) -> TenancyService {
        TenancyService::new(Arc::new(units), Arc::new(tenants), Arc::new(payments))
    }

    #[tokio::test]
    async fn test_occupy_vacant_unit() {
        let row = vacant_row();
        let unit_id = row.unit.id;

        let mut units = MockUnitRepository::new();
        units.expect_find_by_id().returning(move |_, _| Ok(Some(row.clone())));
        units
            .expect_occupy()
            .withf(move |id, tenant| *id == unit_id && tenant.unit_id == unit_id)
            .times(1)
            .returning(|_, _| Ok(()));

        let tenant = service(units, MockTenantRepository::new(), MockPaymentRepository::new())
            .occupy_unit(&Session::new(Uuid::new_v4()), unit_id, contact("Peter Kamau"))
            .await
            .unwrap();
        assert_eq!(tenant.name, "Peter Kamau");
    }

    #[tokio::test]
    async fn test_occupy_occupied_unit_conflicts() {
        let row = occupied_row();
        let unit_id = row.unit.id;

        let mut units = MockUnitRepository::new();
        units.expect_find_by_id().returning(move |_, _| Ok(Some(row.clone())));
        units.expect_occupy().never();

        let result = service(units, MockTenantRepository::new(), MockPaymentRepository::new())
            .occupy_unit(&Session::new(Uuid::new_v4()), unit_id, contact("Peter Kamau"))
            .await;
        assert!(matches!(result, Err(DomainError::UnitAlreadyOccupied(_))));
    }

    #[tokio::test]
    async fn test_vacate_removes_linked_tenant() {
        let row = occupied_row();
        let unit_id = row.unit.id;
        let tenant_id = row.tenant.as_ref().unwrap().id;

        let mut units = MockUnitRepository::new();
        units.expect_find_by_id().returning(move |_, _| Ok(Some(row.clone())));
        units
            .expect_vacate()
            .withf(move |u, t, _| *u == unit_id && *t == tenant_id)
            .times(1)
            .returning(|_, _, _| Ok(()));

        service(units, MockTenantRepository::new(), MockPaymentRepository::new())
            .vacate_unit(&Session::new(Uuid::new_v4()), unit_id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_vacate_vacant_unit_conflicts() {
        let row = vacant_row();
        let unit_id = row.unit.id;

        let mut units = MockUnitRepository::new();
        units.expect_find_by_id().returning(move |_, _| Ok(Some(row.clone())));
        units.expect_vacate().never();

        let result = service(units, MockTenantRepository::new(), MockPaymentRepository::new())
            .vacate_unit(&Session::new(Uuid::new_v4()), unit_id)
            .await;
        assert!(matches!(result, Err(DomainError::UnitNotOccupied(_))));
    }

    #[tokio::test]
    async fn test_inconsistent_row_aborts() {
        let mut row = vacant_row();
        row.unit.occupy().unwrap();
        let unit_id = row.unit.id;

        let mut units = MockUnitRepository::new();
        units.expect_find_by_id().returning(move |_, _| Ok(Some(row.clone())));
        units.expect_vacate().never();

        let result = service(units, MockTenantRepository::new(), MockPaymentRepository::new())
            .vacate_unit(&Session::new(Uuid::new_v4()), unit_id)
            .await;
        assert!(matches!(result, Err(DomainError::ConsistencyError(_))));
    }

    #[tokio::test]
    async fn test_delete_occupied_unit_conflicts() {
        let row = occupied_row();
        let unit_id = row.unit.id;

        let mut units = MockUnitRepository::new();
        units.expect_find_by_id().returning(move |_, _| Ok(Some(row.clone())));
        units.expect_delete_vacant().never();

        let result = service(units, MockTenantRepository::new(), MockPaymentRepository::new())
            .delete_unit(&Session::new(Uuid::new_v4()), unit_id)
            .await;
        assert!(matches!(result, Err(DomainError::UnitOccupied(_))));
    }

    #[tokio::test]
    async fn test_delete_unknown_unit() {
        let mut units = MockUnitRepository::new();
        units.expect_find_by_id().returning(|_, _| Ok(None));

        let result = service(units, MockTenantRepository::new(), MockPaymentRepository::new())
            .delete_unit(&Session::new(Uuid::new_v4()), Uuid::new_v4())
            .await;
        assert!(matches!(result, Err(DomainError::UnitNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_tenants_filters_and_derives_ledgers() {
        let property = Uuid::new_v4();
        let jane = record("Jane Wanjiku", property);
        let peter = record("Peter Kamau", property);
        let elsewhere = record("Grace Achieng", Uuid::new_v4());
        let jane_id = jane.tenant.id;
        let rows = vec![peter.clone(), jane.clone(), elsewhere];

        let mut tenants = MockTenantRepository::new();
        tenants.expect_list_active_by_owner().returning(move |_| Ok(rows.clone()));
        let mut payments = MockPaymentRepository::new();
        payments.expect_list_by_owner().returning(move |_| {
            Ok(vec![
                Payment::new(jane_id, Money::new(4000), PaymentMethod::Cash, Utc::now()).unwrap(),
                Payment::new(jane_id, Money::new(8000), PaymentMethod::Cash, Utc::now()).unwrap(),
                // removed tenant
                Payment::new(Uuid::new_v4(), Money::new(999), PaymentMethod::Cash, Utc::now()).unwrap(),
            ])
        });

        let service = service(MockUnitRepository::new(), tenants, payments);
        let session = Session::new(Uuid::new_v4());

        let filter = TenantFilter {
            property_id: Some(property),
            query: None,
        };
        let listed = service.list_tenants(&session, &filter).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|s| s.record.tenant.name.as_str()).collect();
        assert_eq!(names, vec!["Jane Wanjiku", "Peter Kamau"]);
        assert_eq!(listed[0].ledger.balance, Money::new(2000));
        assert_eq!(listed[1].ledger.balance, Money::new(-10000));

        let filter = TenantFilter {
            property_id: Some(property),
            query: Some("peter".to_string()),
        };
        let found = service.list_tenants(&session, &filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].record.tenant.id, peter.tenant.id);
    }

    #[tokio::test]
    async fn test_failed_payment_fetch_is_not_zero_owed() {
        let rows = vec![record("Jane Wanjiku", Uuid::new_v4())];
        let mut tenants = MockTenantRepository::new();
        tenants.expect_list_active_by_owner().returning(move |_| Ok(rows.clone()));
        let mut payments = MockPaymentRepository::new();
        payments
            .expect_list_by_owner()
            .returning(|_| Err(DomainError::DatabaseError("timeout".to_string())));

        let result = service(MockUnitRepository::new(), tenants, payments)
            .list_tenants(&Session::new(Uuid::new_v4()), &TenantFilter::default())
            .await;
        assert!(matches!(result, Err(DomainError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_update_tenant_contact() {
        let jane = record("Jane Wanjiku", Uuid::new_v4());
        let tenant_id = jane.tenant.id;

        let mut tenants = MockTenantRepository::new();
        tenants.expect_find_active().returning(move |_, _| Ok(Some(jane.clone())));
        tenants.expect_update_contact().returning(|t| Ok(t.clone()));

        let updated = service(MockUnitRepository::new(), tenants, MockPaymentRepository::new())
            .update_tenant(&Session::new(Uuid::new_v4()), tenant_id, contact("Jane W. Mwangi"))
            .await
            .unwrap();
        assert_eq!(updated.name, "Jane W. Mwangi");
        assert!(updated.modified_at.is_some());
    }
}
