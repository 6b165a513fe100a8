//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle, sus coordenadas y el tipo de
//! combustible. Es el mismo modelo que expone la API primaria y que consumen
//! los servicios derivados.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tipo de combustible - mapea a la columna fuel_type (VARCHAR)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelType {
    Kerosene,
    Electricity,
    Diesel,
    Alcohol,
    Nuclear,
}

impl FuelType {
    pub const ALL: [FuelType; 5] = [
        FuelType::Kerosene,
        FuelType::Electricity,
        FuelType::Diesel,
        FuelType::Alcohol,
        FuelType::Nuclear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Kerosene => "KEROSENE",
            FuelType::Electricity => "ELECTRICITY",
            FuelType::Diesel => "DIESEL",
            FuelType::Alcohol => "ALCOHOL",
            FuelType::Nuclear => "NUCLEAR",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown fuel type: {0}")]
pub struct UnknownFuelType(pub String);

/// Coincidencia exacta con el nombre del enum, sensible a mayúsculas.
impl FromStr for FuelType {
    type Err = UnknownFuelType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        FuelType::ALL
            .into_iter()
            .find(|fuel| fuel.as_str() == value)
            .ok_or_else(|| UnknownFuelType(value.to_string()))
    }
}

/// Coordenadas del vehículo. Pertenecen exclusivamente a su Vehicle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coordinates {
    pub x: i64,
    pub y: i32,
}

/// Vehicle principal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i32,
    pub name: String,
    pub coordinates: Coordinates,
    pub creation_date: DateTime<Utc>,
    pub engine_power: Option<i64>,
    pub number_of_wheels: Option<i64>,
    pub capacity: f64,
    pub fuel_type: FuelType,
}

/// Datos de un vehículo aún no persistido (sin id ni fecha de creación)
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub name: String,
    pub coordinates: Coordinates,
    pub engine_power: Option<i64>,
    pub number_of_wheels: Option<i64>,
    pub capacity: f64,
    pub fuel_type: FuelType,
}

impl NewVehicle {
    /// Materializa el vehículo con el id asignado por el store y el reloj del servidor
    pub fn into_vehicle(self, id: i32, creation_date: DateTime<Utc>) -> Vehicle {
        Vehicle {
            id,
            name: self.name,
            coordinates: self.coordinates,
            creation_date,
            engine_power: self.engine_power,
            number_of_wheels: self.number_of_wheels,
            capacity: self.capacity,
            fuel_type: self.fuel_type,
        }
    }
}

/// Patch parcial de coordenadas
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoordinatesPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
}

/// Actualización "merge-patch": solo los campos presentes sobrescriben.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<CoordinatesPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_power: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_wheels: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<FuelType>,
}

impl VehiclePatch {
    pub fn number_of_wheels(number_of_wheels: i64) -> Self {
        Self {
            number_of_wheels: Some(number_of_wheels),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Aplica el patch sobre un vehículo existente. id y creation_date no cambian.
    pub fn apply_to(&self, vehicle: &mut Vehicle) {
        if let Some(name) = &self.name {
            vehicle.name = name.clone();
        }
        if let Some(coordinates) = self.coordinates {
            if let Some(x) = coordinates.x {
                vehicle.coordinates.x = x;
            }
            if let Some(y) = coordinates.y {
                vehicle.coordinates.y = y;
            }
        }
        if let Some(engine_power) = self.engine_power {
            vehicle.engine_power = Some(engine_power);
        }
        if let Some(number_of_wheels) = self.number_of_wheels {
            vehicle.number_of_wheels = Some(number_of_wheels);
        }
        if let Some(capacity) = self.capacity {
            vehicle.capacity = capacity;
        }
        if let Some(fuel_type) = self.fuel_type {
            vehicle.fuel_type = fuel_type;
        }
    }
}
