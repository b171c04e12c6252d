//! # Keja Infrastructure
//!
//! PostgreSQL implementations (adapters) of the keja-core repository ports.

pub mod database;

pub use database::{
    create_pool, run_migrations, PgMaintenanceRepository, PgPaymentRepository, PgProfileRepository,
    PgPropertyRepository, PgTenantRepository, PgUnitRepository, MIGRATOR,
};
