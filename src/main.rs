use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tracing::{error, info};

use vehicle_inventory::config::{DatabaseConfig, EnvironmentConfig, StoreBackend};
use vehicle_inventory::database::DatabaseConnection;
use vehicle_inventory::repositories::{InMemoryVehicleStore, PgVehicleStore, VehicleStore};
use vehicle_inventory::routes::vehicle_app;
use vehicle_inventory::server::{init_tracing, serve};
use vehicle_inventory::state::AppState;

const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    init_tracing();

    info!("🚗 Vehicle Service");
    info!("================================================");

    let config = EnvironmentConfig::from_env(DEFAULT_PORT)?;
    info!("⚙️ Environment: {}", config.environment);

    let store: Arc<dyn VehicleStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let connection = match DatabaseConnection::connect(&db_config).await {
                Ok(connection) => connection,
                Err(e) => {
                    error!("❌ Error connecting to the database: {}", e);
                    return Err(anyhow::anyhow!("Database error: {}", e));
                }
            };
            if let Err(e) = connection.health_check().await {
                error!("❌ Database health check failed: {}", e);
                return Err(anyhow::anyhow!("Database error: {}", e));
            }
            info!("✅ Database ready");
            Arc::new(PgVehicleStore::new(connection.into_pool()))
        }
        StoreBackend::Memory => {
            info!("🧠 Using in-memory store");
            Arc::new(InMemoryVehicleStore::new())
        }
    };

    let address = config.server_url();
    let app = vehicle_app(AppState::new(config, store));

    info!("📋 Endpoints:");
    info!("   GET    /health");
    info!("   GET    /api/vehicles");
    info!("   POST   /api/vehicles");
    info!("   GET    /api/vehicles/:id");
    info!("   PATCH  /api/vehicles/:id");
    info!("   DELETE /api/vehicles/:id");
    info!("   GET    /api/vehicles/search/name-starts-with/:prefix");
    info!("   GET    /api/vehicles/stats/average-engine-power");
    info!("   GET    /api/vehicles/stats/count-by-wheels/:wheels");

    serve(app, &address).await
}
