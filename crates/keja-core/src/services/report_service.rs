// ============================================================================
// Keja Core - Report Service
// File: crates/keja-core/src/services/report_service.rs
// Description: Loads the owner's portfolio once per request and hands it to
//              the aggregator
// ============================================================================

use std::sync::Arc;

use tracing::info;

use crate::domain::{Payment, Session, TenantRecord, Unit};
use crate::error::DomainError;
use crate::reports::{self, ArrearsEntry, DashboardStats, MonthlyTotal, ReportSummary};
use crate::repositories::{PaymentRepository, PropertyRepository, TenantRepository, UnitRepository};

/// Rows every report is computed from
struct Portfolio {
    units: Vec<Unit>,
    tenants: Vec<TenantRecord>,
    payments: Vec<Payment>,
}

impl Portfolio {
    fn arrears(&self) -> Result<Vec<ArrearsEntry>, DomainError> {
        reports::arrears_report(&self.tenants, &self.payments)
    }
}

pub struct ReportService {
    property_repo: Arc<dyn PropertyRepository>,
    unit_repo: Arc<dyn UnitRepository>,
    tenant_repo: Arc<dyn TenantRepository>,
    payment_repo: Arc<dyn PaymentRepository>,
}

impl ReportService {
    pub fn new(
        property_repo: Arc<dyn PropertyRepository>,
        unit_repo: Arc<dyn UnitRepository>,
        tenant_repo: Arc<dyn TenantRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
    ) -> Self {
        Self {
            property_repo,
            unit_repo,
            tenant_repo,
            payment_repo,
        }
    }

    async fn load(&self, session: &Session) -> Result<Portfolio, DomainError> {
        let units = self
            .unit_repo
            .list_by_owner(session.user_id, None)
            .await?
            .into_iter()
            .map(|row| row.unit)
            .collect();
        let tenants = self.tenant_repo.list_active_by_owner(session.user_id).await?;
        let payments = self.payment_repo.list_by_owner(session.user_id).await?;

        Ok(Portfolio {
            units,
            tenants,
            payments,
        })
    }

    pub async fn summary(&self, session: &Session) -> Result<ReportSummary, DomainError> {
        let portfolio = self.load(session).await?;
        let entries = portfolio.arrears()?;
        Ok(reports::summarize(&portfolio.units, &entries, &portfolio.payments))
    }

    pub async fn monthly(&self, session: &Session) -> Result<Vec<MonthlyTotal>, DomainError> {
        let payments = self.payment_repo.list_by_owner(session.user_id).await?;
        Ok(reports::monthly_report(&payments))
    }

    pub async fn top_debtors(&self, session: &Session, limit: Option<usize>) -> Result<Vec<ArrearsEntry>, DomainError> {
        let portfolio = self.load(session).await?;
        Ok(reports::top_debtors(&portfolio.arrears()?, limit))
    }

    pub async fn dashboard(&self, session: &Session) -> Result<DashboardStats, DomainError> {
        let property_count = self.property_repo.list_by_owner(session.user_id).await?.len();
        let portfolio = self.load(session).await?;
        let entries = portfolio.arrears()?;
        Ok(reports::dashboard(property_count, &portfolio.units, &entries, &portfolio.payments))
    }

    pub async fn monthly_csv(&self, session: &Session) -> Result<Vec<u8>, DomainError> {
        let rows = self.monthly(session).await?;
        let csv = reports::monthly_report_csv(&rows)?;
        info!("Exported monthly report ({} months) for user {}", rows.len(), session.user_id);
        Ok(csv)
    }

    /// Every debtor, largest amount owed first.
    pub async fn arrears_csv(&self, session: &Session) -> Result<Vec<u8>, DomainError> {
        let debtors = self.top_debtors(session, None).await?;
        let csv = reports::arrears_report_csv(&debtors)?;
        info!("Exported arrears report ({} debtors) for user {}", debtors.len(), session.user_id);
        Ok(csv)
    }
}
