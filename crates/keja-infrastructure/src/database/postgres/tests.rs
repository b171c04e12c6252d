//! Adapter tests against a live PostgreSQL. Run with
//! `DATABASE_URL=postgres://... cargo test -p keja-infrastructure -- --ignored`.

use chrono::Utc;
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use keja_core::domain::{Money, Payment, PaymentMethod, Property, Tenant, TenantContact, Unit, UnitStatus};
use keja_core::error::DomainError;
use keja_core::repositories::{PaymentRepository, PropertyRepository, TenantRepository, UnitRepository};

use super::*;

struct Seeded {
    owner: Uuid,
    occupied: Unit,
    tenant: Tenant,
    vacant: Unit,
}

async fn seed(pool: &PgPool, rent: i64) -> anyhow::Result<Seeded> {
    let owner = Uuid::new_v4();
    let property = Property::new(owner, "Sunrise Court".to_string(), "Nairobi".to_string())?;

    let mut occupied = Unit::new(property.id, "A1".to_string(), Money::new(rent))?;
    occupied.occupy()?;
    let tenant = Tenant::new(occupied.id, TenantContact::new("Jane Wanjiku", "0712345678")?);
    let vacant = Unit::new(property.id, "A2".to_string(), Money::new(9000))?;

    PgPropertyRepository::new(pool.clone())
        .create_with_units(
            &property,
            &[(occupied.clone(), Some(tenant.clone())), (vacant.clone(), None)],
        )
        .await?;

    Ok(Seeded {
        owner,
        occupied,
        tenant,
        vacant,
    })
}

async fn cached_balance(pool: &PgPool, tenant_id: Uuid) -> anyhow::Result<i64> {
    Ok(sqlx::query_scalar("SELECT balance FROM tenants WHERE id = $1")
        .bind(tenant_id)
        .fetch_one(pool)
        .await?)
}

#[sqlx::test(migrator = "crate::database::MIGRATOR")]
#[ignore]
async fn test_payment_refreshes_cached_balance(pool: Pool<Postgres>) -> anyhow::Result<()> {
    let seeded = seed(&pool, 15000).await?;
    let repo = PgPaymentRepository::new(pool.clone());
    assert_eq!(cached_balance(&pool, seeded.tenant.id).await?, -15000);

    for amount in [5000, 5000] {
        let payment = Payment::new(seeded.tenant.id, Money::new(amount), PaymentMethod::Cash, Utc::now())?;
        repo.append(&payment).await?;
    }
    assert_eq!(cached_balance(&pool, seeded.tenant.id).await?, -5000);

    let payment = Payment::new(seeded.tenant.id, Money::new(7000), PaymentMethod::MobileMoney, Utc::now())?;
    let recorded = repo.append(&payment).await?;
    assert_eq!(recorded.balance, Money::new(2000));
    assert_eq!(cached_balance(&pool, seeded.tenant.id).await?, 2000);

    let history = repo.list_history(seeded.owner).await?;
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].unit_number, "A1");

    Ok(())
}

#[sqlx::test(migrator = "crate::database::MIGRATOR")]
#[ignore]
async fn test_vacate_is_atomic(pool: Pool<Postgres>) -> anyhow::Result<()> {
    let seeded = seed(&pool, 12000).await?;
    let units = PgUnitRepository::new(pool.clone());

    // Wrong tenant: nothing changes
    let result = units.vacate(seeded.occupied.id, Uuid::new_v4(), Utc::now()).await;
    assert!(matches!(result, Err(DomainError::ConsistencyError(_))));
    let row = units.find_by_id(seeded.owner, seeded.occupied.id).await?.expect("unit");
    assert_eq!(row.unit.status, UnitStatus::Occupied);
    assert_eq!(row.tenant.map(|t| t.id), Some(seeded.tenant.id));

    units.vacate(seeded.occupied.id, seeded.tenant.id, Utc::now()).await?;
    let row = units.find_by_id(seeded.owner, seeded.occupied.id).await?.expect("unit");
    assert_eq!(row.unit.status, UnitStatus::Vacant);
    assert!(row.tenant.is_none());

    let active = PgTenantRepository::new(pool.clone()).list_active_by_owner(seeded.owner).await?;
    assert!(active.is_empty());

    Ok(())
}

#[sqlx::test(migrator = "crate::database::MIGRATOR")]
#[ignore]
async fn test_occupy_twice_conflicts(pool: Pool<Postgres>) -> anyhow::Result<()> {
    let seeded = seed(&pool, 12000).await?;
    let units = PgUnitRepository::new(pool.clone());

    let newcomer = Tenant::new(seeded.vacant.id, TenantContact::new("Peter Kamau", "0722333444")?);
    units.occupy(seeded.vacant.id, &newcomer).await?;

    let second = Tenant::new(seeded.vacant.id, TenantContact::new("Grace Achieng", "0733444555")?);
    let result = units.occupy(seeded.vacant.id, &second).await;
    assert!(matches!(result, Err(DomainError::UnitAlreadyOccupied(_))));

    let row = units.find_by_id(seeded.owner, seeded.vacant.id).await?.expect("unit");
    assert_eq!(row.tenant.map(|t| t.id), Some(newcomer.id));
    assert_eq!(cached_balance(&pool, newcomer.id).await?, -9000);

    Ok(())
}

#[sqlx::test(migrator = "crate::database::MIGRATOR")]
#[ignore]
async fn test_unit_with_history_is_not_deleted(pool: Pool<Postgres>) -> anyhow::Result<()> {
    let seeded = seed(&pool, 12000).await?;
    let units = PgUnitRepository::new(pool.clone());

    let payment = Payment::new(seeded.tenant.id, Money::new(1000), PaymentMethod::Cash, Utc::now())?;
    PgPaymentRepository::new(pool.clone()).append(&payment).await?;
    units.vacate(seeded.occupied.id, seeded.tenant.id, Utc::now()).await?;

    let result = units.delete_vacant(seeded.occupied.id).await;
    assert!(matches!(result, Err(DomainError::UnitHasHistory(_))));

    assert!(units.delete_vacant(seeded.vacant.id).await?);
    Ok(())
}

#[sqlx::test(migrator = "crate::database::MIGRATOR")]
#[ignore]
async fn test_reads_are_owner_scoped(pool: Pool<Postgres>) -> anyhow::Result<()> {
    let seeded = seed(&pool, 12000).await?;
    let stranger = Uuid::new_v4();

    assert!(PgUnitRepository::new(pool.clone()).find_by_id(stranger, seeded.occupied.id).await?.is_none());
    assert!(PgTenantRepository::new(pool.clone()).find_active(stranger, seeded.tenant.id).await?.is_none());
    assert!(PgPropertyRepository::new(pool.clone()).list_by_owner(stranger).await?.is_empty());

    Ok(())
}

#[sqlx::test(migrator = "crate::database::MIGRATOR")]
#[ignore]
async fn test_duplicate_unit_number_rejected(pool: Pool<Postgres>) -> anyhow::Result<()> {
    let owner = Uuid::new_v4();
    let property = Property::new(owner, "Hill View".to_string(), "Nakuru".to_string())?;
    let first = Unit::new(property.id, "B1".to_string(), Money::new(5000))?;
    let second = Unit::new(property.id, "B1".to_string(), Money::new(6000))?;

    let result = PgPropertyRepository::new(pool.clone())
        .create_with_units(&property, &[(first, None), (second, None)])
        .await;
    assert!(matches!(result, Err(DomainError::UnitNumberAlreadyExists(_))));

    // The whole creation rolled back
    let repo = PgPropertyRepository::new(pool.clone());
    assert!(repo.list_by_owner(owner).await?.is_empty());
    Ok(())
}
