use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tracing::info;

use vehicle_inventory::clients::VehiclesApiClient;
use vehicle_inventory::config::{EnvironmentConfig, UpstreamConfig};
use vehicle_inventory::routes::reports_app;
use vehicle_inventory::server::{init_tracing, serve};
use vehicle_inventory::state::ReportsState;

const DEFAULT_PORT: u16 = 8082;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    info!("📊 Reports Service");
    info!("================================================");

    let config = EnvironmentConfig::from_env(DEFAULT_PORT)?;
    let upstream = UpstreamConfig::from_env()?;
    info!(
        "🔗 Upstream {} (concurrency {}, drain timeout {:?})",
        upstream.base_url, upstream.drain_concurrency, upstream.drain_timeout
    );

    let client = Arc::new(VehiclesApiClient::from_config(&upstream)?);
    let address = config.server_url();
    let app = reports_app(ReportsState::new(config, &upstream, client));

    info!("📋 Endpoints:");
    info!("   GET    /health");
    info!("   GET    /api/reports/maintenance/:vehicle_id");
    info!("   GET    /api/vehicles/search/by-coordinates");

    serve(app, &address).await
}
