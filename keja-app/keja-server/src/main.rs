use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};

use keja_api::{build_router, AppState, Repositories};
use keja_infrastructure::{
    create_pool, run_migrations, PgMaintenanceRepository, PgPaymentRepository, PgProfileRepository,
    PgPropertyRepository, PgTenantRepository, PgUnitRepository,
};
use keja_shared::config::AppConfig;
use keja_shared::telemetry::init_telemetry;
use keja_shared::AppError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (.env, config files, KEJA__* variables)
    let config = AppConfig::load().map_err(AppError::from)?;

    // Initialize telemetry; the guard flushes the file writer on exit
    let _log_guard = init_telemetry(&config.log)?;

    info!("{} starting ({})...", config.app.name, config.app.env);

    // Connect to Database
    let pool = match create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };
    info!("Database connection established.");

    if config.database.run_migrations {
        run_migrations(&pool).await?;
        info!("Migrations applied.");
    }

    let repos = Repositories {
        properties: Arc::new(PgPropertyRepository::new(pool.clone())),
        units: Arc::new(PgUnitRepository::new(pool.clone())),
        tenants: Arc::new(PgTenantRepository::new(pool.clone())),
        payments: Arc::new(PgPaymentRepository::new(pool.clone())),
        maintenance: Arc::new(PgMaintenanceRepository::new(pool.clone())),
        profiles: Arc::new(PgProfileRepository::new(pool.clone())),
    };

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));

    let app = build_router(AppState::new(config, repos, Some(pool)));

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
