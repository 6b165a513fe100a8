//! Routers HTTP de los tres servicios
//!
//! Cada `*_app` devuelve el router completo (health, API, fallback 404,
//! compresión, CORS y trazas) listo para `axum::serve`.

pub mod reports_routes;
pub mod shop_routes;
pub mod vehicle_routes;

use axum::{routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors_for;
use crate::state::{AppState, ReportsState, ShopState};
use crate::utils::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

fn health_router<S>(service: &'static str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/health",
        get(move || async move {
            Json(HealthResponse {
                status: "ok".to_string(),
                service: service.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: Utc::now(),
            })
        }),
    )
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// Servicio principal de vehículos
pub fn vehicle_app(state: AppState) -> Router {
    let cors = cors_for(&state.config.cors_origins);
    health_router("vehicle-service")
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .fallback(route_not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Servicio de tienda
pub fn shop_app(state: ShopState) -> Router {
    let cors = cors_for(&state.config.cors_origins);
    health_router("shop-service")
        .nest("/api/shop", shop_routes::create_shop_router())
        .fallback(route_not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Servicio de reportes
pub fn reports_app(state: ReportsState) -> Router {
    let cors = cors_for(&state.config.cors_origins);
    health_router("reports-service")
        .nest("/api/reports", reports_routes::create_reports_router())
        .nest("/api/vehicles", reports_routes::create_vehicle_search_router())
        .fallback(route_not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
