//! Shared application state
//!
//! Este módulo define el estado compartido de cada servicio que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::clients::RemoteVehicleCollection;
use crate::config::{EnvironmentConfig, UpstreamConfig};
use crate::repositories::VehicleStore;
use crate::services::{
    PaginationAggregator, ProximitySearchService, ReportService, ShopService, VehicleService,
};

/// Estado del servicio principal
#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub vehicles: VehicleService,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, store: Arc<dyn VehicleStore>) -> Self {
        Self {
            config,
            vehicles: VehicleService::new(store),
        }
    }
}

/// Estado del servicio de tienda
#[derive(Clone)]
pub struct ShopState {
    pub config: EnvironmentConfig,
    pub shop: ShopService,
}

impl ShopState {
    pub fn new(
        config: EnvironmentConfig,
        upstream: &UpstreamConfig,
        collection: Arc<dyn RemoteVehicleCollection>,
    ) -> Self {
        let aggregator = PaginationAggregator::from_config(collection.clone(), upstream);
        Self {
            config,
            shop: ShopService::new(collection, aggregator),
        }
    }
}

/// Estado del servicio de reportes
#[derive(Clone)]
pub struct ReportsState {
    pub config: EnvironmentConfig,
    pub reports: ReportService,
    pub proximity: ProximitySearchService,
}

impl ReportsState {
    pub fn new(
        config: EnvironmentConfig,
        upstream: &UpstreamConfig,
        collection: Arc<dyn RemoteVehicleCollection>,
    ) -> Self {
        let aggregator = PaginationAggregator::from_config(collection.clone(), upstream);
        Self {
            config,
            reports: ReportService::new(collection),
            proximity: ProximitySearchService::new(aggregator),
        }
    }
}
