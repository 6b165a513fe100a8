//! Criterios de búsqueda de vehículos
//!
//! `compile` convierte un `SearchCriteria` en un `Predicate`. Es una función
//! pura: no toca el store y no falla nunca.

use serde::{Deserialize, Serialize};

use super::predicate::{CompareOp, FieldValue, Predicate, VehicleField};
use crate::models::FuelType;

/// Criterios opcionales. Un criterio ausente no restringe nada.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_engine_power: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_engine_power: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_wheels: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_wheels: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_capacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<f64>,
    /// Sin parsear: un valor desconocido compila a `Predicate::Never`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
}

impl SearchCriteria {
    pub fn engine_power_between(min: Option<i64>, max: Option<i64>) -> Self {
        Self {
            min_engine_power: min,
            max_engine_power: max,
            ..Self::default()
        }
    }

    /// Rangos invertidos (min > max). Lo valida quien llama, no el compilador.
    pub fn inverted_ranges(&self) -> Vec<&'static str> {
        let mut inverted = Vec::new();
        if let (Some(min), Some(max)) = (self.min_engine_power, self.max_engine_power) {
            if min > max {
                inverted.push("enginePower");
            }
        }
        if let (Some(min), Some(max)) = (self.min_wheels, self.max_wheels) {
            if min > max {
                inverted.push("numberOfWheels");
            }
        }
        if let (Some(min), Some(max)) = (self.min_capacity, self.max_capacity) {
            if min > max {
                inverted.push("capacity");
            }
        }
        inverted
    }
}

/// Compila los criterios a un predicado. AND de todas las condiciones presentes.
pub fn compile(criteria: &SearchCriteria) -> Predicate {
    let mut predicate = Predicate::Always;

    if let Some(name) = criteria.name.as_deref().filter(|name| !name.is_empty()) {
        predicate = predicate.and(Predicate::name_contains(name));
    }

    predicate = predicate
        .and(int_range(
            VehicleField::EnginePower,
            criteria.min_engine_power,
            criteria.max_engine_power,
        ))
        .and(int_range(
            VehicleField::NumberOfWheels,
            criteria.min_wheels,
            criteria.max_wheels,
        ));

    // Capacidad: mínimo exclusivo, máximo inclusivo
    if let Some(min) = criteria.min_capacity {
        predicate = predicate.and(Predicate::compare(
            VehicleField::Capacity,
            CompareOp::Gt,
            FieldValue::Real(min),
        ));
    }
    if let Some(max) = criteria.max_capacity {
        predicate = predicate.and(Predicate::compare(
            VehicleField::Capacity,
            CompareOp::Le,
            FieldValue::Real(max),
        ));
    }

    if let Some(raw) = criteria.fuel_type.as_deref().filter(|raw| !raw.is_empty()) {
        let condition = match raw.parse::<FuelType>() {
            Ok(fuel_type) => Predicate::compare(
                VehicleField::FuelType,
                CompareOp::Eq,
                FieldValue::Fuel(fuel_type),
            ),
            Err(_) => {
                log::debug!("🔍 Unknown fuel type filter '{}', nothing will match", raw);
                Predicate::Never
            }
        };
        predicate = predicate.and(condition);
    }

    predicate
}

fn int_range(field: VehicleField, min: Option<i64>, max: Option<i64>) -> Predicate {
    let lower = min
        .map(|min| Predicate::compare(field, CompareOp::Ge, FieldValue::Int(min)))
        .unwrap_or_default();
    let upper = max
        .map(|max| Predicate::compare(field, CompareOp::Le, FieldValue::Int(max)))
        .unwrap_or_default();
    lower.and(upper)
}
