//! Predicados sobre vehículos
//!
//! Un `Predicate` es un valor inmutable (árbol de comparaciones unidas por AND)
//! que se evalúa igual en memoria (`matches`) y en PostgreSQL (`push_sql`).
//! El mismo valor se pasa a la consulta de conteo y a la de datos.

use std::cmp::Ordering;

use sqlx::{Postgres, QueryBuilder};

use crate::models::{FuelType, Vehicle};

/// Campos filtrables / ordenables del vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleField {
    Id,
    Name,
    EnginePower,
    NumberOfWheels,
    Capacity,
    FuelType,
}

impl VehicleField {
    /// Columna SQL (alias `v` = tabla vehicle)
    pub fn column(&self) -> &'static str {
        match self {
            VehicleField::Id => "v.id",
            VehicleField::Name => "v.name",
            VehicleField::EnginePower => "v.engine_power",
            VehicleField::NumberOfWheels => "v.number_of_wheels",
            VehicleField::Capacity => "v.capacity",
            VehicleField::FuelType => "v.fuel_type",
        }
    }

    fn value_of(&self, vehicle: &Vehicle) -> Option<FieldValue> {
        match self {
            VehicleField::Id => Some(FieldValue::Int(i64::from(vehicle.id))),
            VehicleField::Name => Some(FieldValue::Text(vehicle.name.clone())),
            VehicleField::EnginePower => vehicle.engine_power.map(FieldValue::Int),
            VehicleField::NumberOfWheels => vehicle.number_of_wheels.map(FieldValue::Int),
            VehicleField::Capacity => Some(FieldValue::Real(vehicle.capacity)),
            VehicleField::FuelType => Some(FieldValue::Fuel(vehicle.fuel_type)),
        }
    }

    /// Orden ascendente con los valores ausentes al final (igual que `ASC NULLS LAST`)
    pub fn compare(&self, a: &Vehicle, b: &Vehicle) -> Ordering {
        match (self.value_of(a), self.value_of(b)) {
            (Some(left), Some(right)) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
}

impl CompareOp {
    fn sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => " = ",
            CompareOp::Gt => " > ",
            CompareOp::Ge => " >= ",
            CompareOp::Lt => " < ",
            CompareOp::Le => " <= ",
        }
    }

    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Real(f64),
    Text(String),
    Fuel(FuelType),
}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => Some(a.cmp(b)),
            (FieldValue::Real(a), FieldValue::Real(b)) => a.partial_cmp(b),
            (FieldValue::Int(a), FieldValue::Real(b)) => (*a as f64).partial_cmp(b),
            (FieldValue::Real(a), FieldValue::Int(b)) => a.partial_cmp(&(*b as f64)),
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            (FieldValue::Fuel(a), FieldValue::Fuel(b)) => Some(a.as_str().cmp(b.as_str())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatch {
    Contains,
    StartsWith,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Always,
    Never,
    Compare {
        field: VehicleField,
        op: CompareOp,
        value: FieldValue,
    },
    /// Coincidencia de nombre sin distinguir mayúsculas. `needle` ya está en minúsculas.
    Name { needle: String, mode: TextMatch },
    And(Vec<Predicate>),
}

impl Default for Predicate {
    fn default() -> Self {
        Predicate::Always
    }
}

impl Predicate {
    pub fn compare(field: VehicleField, op: CompareOp, value: FieldValue) -> Self {
        Predicate::Compare { field, op, value }
    }

    pub fn name_contains(needle: &str) -> Self {
        Predicate::Name {
            needle: needle.to_lowercase(),
            mode: TextMatch::Contains,
        }
    }

    pub fn name_starts_with(prefix: &str) -> Self {
        Predicate::Name {
            needle: prefix.to_lowercase(),
            mode: TextMatch::StartsWith,
        }
    }

    pub fn wheels_equal(number_of_wheels: i64) -> Self {
        Predicate::compare(
            VehicleField::NumberOfWheels,
            CompareOp::Eq,
            FieldValue::Int(number_of_wheels),
        )
    }

    /// Conjunción. `Always` es neutro y `Never` absorbe.
    pub fn and(self, other: Predicate) -> Predicate {
        match (self, other) {
            (Predicate::Always, p) | (p, Predicate::Always) => p,
            (Predicate::Never, _) | (_, Predicate::Never) => Predicate::Never,
            (Predicate::And(mut left), Predicate::And(right)) => {
                left.extend(right);
                Predicate::And(left)
            }
            (Predicate::And(mut left), p) => {
                left.push(p);
                Predicate::And(left)
            }
            (p, Predicate::And(mut right)) => {
                right.insert(0, p);
                Predicate::And(right)
            }
            (left, right) => Predicate::And(vec![left, right]),
        }
    }

    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::Never => false,
            Predicate::Compare { field, op, value } => field
                .value_of(vehicle)
                .and_then(|actual| actual.partial_cmp(value))
                .map(|ordering| op.accepts(ordering))
                .unwrap_or(false),
            Predicate::Name { needle, mode } => {
                let name = vehicle.name.to_lowercase();
                match mode {
                    TextMatch::Contains => name.contains(needle.as_str()),
                    TextMatch::StartsWith => name.starts_with(needle.as_str()),
                }
            }
            Predicate::And(parts) => parts.iter().all(|part| part.matches(vehicle)),
        }
    }

    /// Escribe la condición como SQL con parámetros enlazados.
    pub fn push_sql(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Predicate::Always => {
                builder.push("TRUE");
            }
            Predicate::Never => {
                builder.push("FALSE");
            }
            Predicate::Compare { field, op, value } => {
                builder.push(field.column()).push(op.sql());
                match value {
                    FieldValue::Int(v) => builder.push_bind(*v),
                    FieldValue::Real(v) => builder.push_bind(*v),
                    FieldValue::Text(v) => builder.push_bind(v.clone()),
                    FieldValue::Fuel(v) => builder.push_bind(v.as_str()),
                };
            }
            Predicate::Name { needle, mode } => {
                let escaped = escape_like(needle);
                let pattern = match mode {
                    TextMatch::Contains => format!("%{escaped}%"),
                    TextMatch::StartsWith => format!("{escaped}%"),
                };
                builder
                    .push("LOWER(v.name) LIKE ")
                    .push_bind(pattern)
                    .push(" ESCAPE '\\'");
            }
            Predicate::And(parts) => {
                builder.push("(");
                for (index, part) in parts.iter().enumerate() {
                    if index > 0 {
                        builder.push(" AND ");
                    }
                    part.push_sql(builder);
                }
                builder.push(")");
            }
        }
    }
}

/// Escapa los comodines de LIKE (`%`, `_`) y el carácter de escape.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;
    use chrono::Utc;

    fn vehicle(name: &str, engine_power: Option<i64>) -> Vehicle {
        Vehicle {
            id: 1,
            name: name.to_string(),
            coordinates: Coordinates { x: 0, y: 0 },
            creation_date: Utc::now(),
            engine_power,
            number_of_wheels: Some(4),
            capacity: 2.0,
            fuel_type: FuelType::Diesel,
        }
    }

    #[test]
    fn test_and_identity_and_absorption() {
        let cond = Predicate::wheels_equal(4);
        assert_eq!(Predicate::Always.and(cond.clone()), cond);
        assert_eq!(cond.clone().and(Predicate::Never), Predicate::Never);
        assert_eq!(
            cond.clone().and(cond.clone()).and(cond.clone()),
            Predicate::And(vec![cond.clone(), cond.clone(), cond])
        );
    }

    #[test]
    fn test_absent_attribute_never_matches_comparison() {
        let ge = Predicate::compare(VehicleField::EnginePower, CompareOp::Ge, FieldValue::Int(1));
        assert!(ge.matches(&vehicle("a", Some(1))));
        assert!(!ge.matches(&vehicle("a", None)));
    }

    #[test]
    fn test_name_matching_is_case_insensitive() {
        let v = vehicle("Big Red Truck", None);
        assert!(Predicate::name_contains("RED").matches(&v));
        assert!(!Predicate::name_starts_with("red").matches(&v));
        assert!(Predicate::name_starts_with("bIG").matches(&v));
    }

    #[test]
    fn test_sql_rendering_binds_values() {
        let predicate = Predicate::name_contains("50%_off")
            .and(Predicate::compare(
                VehicleField::Capacity,
                CompareOp::Gt,
                FieldValue::Real(1.5),
            ));
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM vehicle v WHERE ");
        predicate.push_sql(&mut builder);
        assert_eq!(
            builder.sql(),
            "SELECT 1 FROM vehicle v WHERE (LOWER(v.name) LIKE $1 ESCAPE '\\' AND v.capacity > $2)"
        );
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("a%b_c\\d"), "a\\%b\\_c\\\\d");
    }

    #[test]
    fn test_compare_orders_absent_last() {
        let with = vehicle("a", Some(10));
        let without = vehicle("b", None);
        assert_eq!(VehicleField::EnginePower.compare(&with, &without), Ordering::Less);
        assert_eq!(VehicleField::Name.compare(&with, &without), Ordering::Less);
    }
}
