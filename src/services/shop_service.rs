//! Servicio de la tienda
//!
//! Operaciones derivadas sobre el servicio principal: búsqueda por rango de
//! potencia (drenando todas las páginas) y fijar el número de ruedas.

use std::sync::Arc;

use crate::clients::{RemoteVehicleCollection, UpstreamError};
use crate::models::{Vehicle, VehiclePatch};
use crate::query::SearchCriteria;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{validate_bounds, validate_min};

use super::pagination_aggregator::{AcceptAll, PaginationAggregator};

#[derive(Clone)]
pub struct ShopService {
    collection: Arc<dyn RemoteVehicleCollection>,
    aggregator: PaginationAggregator,
}

impl ShopService {
    pub fn new(
        collection: Arc<dyn RemoteVehicleCollection>,
        aggregator: PaginationAggregator,
    ) -> Self {
        Self {
            collection,
            aggregator,
        }
    }

    /// Vehículos con potencia en `[from, to]`. El filtro lo aplica el servicio
    /// principal; aquí sólo se drenan las páginas.
    pub async fn search_by_engine_power(&self, from: i64, to: i64) -> AppResult<Vec<Vehicle>> {
        validate_min("from", from, 1)?;
        validate_min("to", to, 1)?;
        validate_bounds("enginePower", from, to)?;

        let criteria = SearchCriteria::engine_power_between(Some(from), Some(to));
        let vehicles = self.aggregator.drain_and_filter(&criteria, &AcceptAll).await?;

        log::info!(
            "🛒 {} vehicles with engine power in [{}, {}]",
            vehicles.len(),
            from,
            to
        );
        Ok(vehicles)
    }

    /// Fija `numberOfWheels` del vehículo (no suma a las que ya tiene)
    pub async fn add_wheels(&self, vehicle_id: i64, number_of_wheels: i64) -> AppResult<Vehicle> {
        validate_min("vehicleId", vehicle_id, 1)?;
        validate_min("numberOfWheels", number_of_wheels, 1)?;

        let id = i32::try_from(vehicle_id)
            .map_err(|_| AppError::NotFound("Vehicle wasn't found".to_string()))?;

        let patch = VehiclePatch::number_of_wheels(number_of_wheels);
        match self.collection.patch(id, &patch).await {
            Ok(vehicle) => {
                log::info!("🛞 Vehicle {} now has {} wheels", id, number_of_wheels);
                Ok(vehicle)
            }
            Err(UpstreamError::NotFound(_)) => {
                Err(AppError::NotFound("Vehicle wasn't found".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
