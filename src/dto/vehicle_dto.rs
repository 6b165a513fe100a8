use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Coordinates, CoordinatesPatch, FuelType, NewVehicle, VehiclePatch};
use crate::query::{PageRequest, SearchCriteria};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{validate_not_empty, validate_positive};

// Request para crear un vehículo
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(custom = "validate_not_empty")]
    pub name: String,
    #[validate(required)]
    pub coordinates: Option<Coordinates>,
    #[validate(range(min = 1))]
    pub engine_power: Option<i64>,
    #[validate(range(min = 1))]
    pub number_of_wheels: Option<i64>,
    #[validate(required, custom = "validate_positive")]
    pub capacity: Option<f64>,
    #[validate(required)]
    pub fuel_type: Option<String>,
}

impl CreateVehicleRequest {
    /// Convertir a modelo. Se llama después de `validate()`.
    pub fn into_new_vehicle(self) -> AppResult<NewVehicle> {
        let coordinates = self
            .coordinates
            .ok_or_else(|| AppError::BadRequest("coordinates are required".to_string()))?;
        let capacity = self
            .capacity
            .ok_or_else(|| AppError::BadRequest("capacity is required".to_string()))?;
        let fuel_type = parse_fuel_type(self.fuel_type.as_deref())?
            .ok_or_else(|| AppError::BadRequest("fuelType is required".to_string()))?;

        Ok(NewVehicle {
            name: self.name,
            coordinates,
            engine_power: self.engine_power,
            number_of_wheels: self.number_of_wheels,
            capacity,
            fuel_type,
        })
    }
}

// Request para actualizar un vehículo (merge patch)
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[validate(custom = "validate_not_empty")]
    pub name: Option<String>,
    pub coordinates: Option<CoordinatesPatch>,
    #[validate(range(min = 1))]
    pub engine_power: Option<i64>,
    #[validate(range(min = 1))]
    pub number_of_wheels: Option<i64>,
    #[validate(custom = "validate_positive")]
    pub capacity: Option<f64>,
    pub fuel_type: Option<String>,
}

impl UpdateVehicleRequest {
    pub fn into_patch(self) -> AppResult<VehiclePatch> {
        Ok(VehiclePatch {
            fuel_type: parse_fuel_type(self.fuel_type.as_deref())?,
            name: self.name,
            coordinates: self.coordinates,
            engine_power: self.engine_power,
            number_of_wheels: self.number_of_wheels,
            capacity: self.capacity,
        })
    }
}

fn parse_fuel_type(value: Option<&str>) -> AppResult<Option<FuelType>> {
    value
        .map(|raw| {
            raw.parse::<FuelType>()
                .map_err(|e| AppError::BadRequest(e.to_string()))
        })
        .transpose()
}

/// Query string del listado: paginación + criterios en un único nivel
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub name: Option<String>,
    pub min_engine_power: Option<i64>,
    pub max_engine_power: Option<i64>,
    pub min_wheels: Option<i64>,
    pub max_wheels: Option<i64>,
    pub min_capacity: Option<f64>,
    pub max_capacity: Option<f64>,
    pub fuel_type: Option<String>,
}

impl VehicleListQuery {
    pub fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            name: self.name.clone(),
            min_engine_power: self.min_engine_power,
            max_engine_power: self.max_engine_power,
            min_wheels: self.min_wheels,
            max_wheels: self.max_wheels,
            min_capacity: self.min_capacity,
            max_capacity: self.max_capacity,
            fuel_type: self.fuel_type.clone(),
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            size: self.size,
            sort: self.sort.clone(),
            order: self.order.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AverageEnginePowerResponse {
    pub average_engine_power: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountResponse {
    pub count: i64,
}
