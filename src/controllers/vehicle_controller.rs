use crate::dto::vehicle_dto::{
    AverageEnginePowerResponse, CountResponse, CreateVehicleRequest, UpdateVehicleRequest,
    VehicleListQuery,
};
use crate::models::Vehicle;
use crate::query::PageEnvelope;
use crate::services::VehicleService;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::validate_min;

pub struct VehicleController {
    service: VehicleService,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: state.vehicles.clone(),
        }
    }

    pub async fn list(&self, query: VehicleListQuery) -> AppResult<PageEnvelope<Vehicle>> {
        self.service
            .list(&query.criteria(), &query.page_request())
            .await
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        let vehicle = request.into_new_vehicle()?;
        self.service.create(vehicle).await
    }

    pub async fn get(&self, id: i64) -> AppResult<Vehicle> {
        self.service.get(vehicle_id(id)?).await
    }

    pub async fn update(&self, id: i64, request: UpdateVehicleRequest) -> AppResult<Vehicle> {
        let patch = request.into_patch()?;
        self.service.update(vehicle_id(id)?, &patch).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.service.delete(vehicle_id(id)?).await
    }

    pub async fn search_by_name_prefix(&self, prefix: &str) -> AppResult<Vec<Vehicle>> {
        self.service.search_by_name_prefix(prefix).await
    }

    pub async fn average_engine_power(&self) -> AppResult<AverageEnginePowerResponse> {
        let average_engine_power = self.service.average_engine_power().await?;
        Ok(AverageEnginePowerResponse {
            average_engine_power,
        })
    }

    pub async fn count_by_wheels(&self, number_of_wheels: i64) -> AppResult<CountResponse> {
        validate_min("numberOfWheels", number_of_wheels, 1)?;
        let count = self.service.count_by_wheels(number_of_wheels).await?;
        Ok(CountResponse { count })
    }
}

// Ids fuera de rango de i32 no pueden existir
fn vehicle_id(id: i64) -> AppResult<i32> {
    i32::try_from(id).map_err(|_| AppError::NotFound(format!("Vehicle with id '{}' not found", id)))
}
