//! Paginación y ordenamiento
//!
//! Parámetros de página tal como llegan del cliente, su versión normalizada y
//! el sobre (`PageEnvelope`) que devuelve el listado.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::predicate::VehicleField;
use crate::models::Vehicle;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Campos permitidos para ordenar. Cualquier otro valor cae en `Id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Name,
    EnginePower,
    NumberOfWheels,
    Capacity,
    FuelType,
}

impl SortField {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("id") => SortField::Id,
            Some("name") => SortField::Name,
            Some("enginePower") => SortField::EnginePower,
            Some("numberOfWheels") => SortField::NumberOfWheels,
            Some("capacity") => SortField::Capacity,
            Some("fuelType") => SortField::FuelType,
            _ => SortField::Id,
        }
    }

    pub fn field(&self) -> VehicleField {
        match self {
            SortField::Id => VehicleField::Id,
            SortField::Name => VehicleField::Name,
            SortField::EnginePower => VehicleField::EnginePower,
            SortField::NumberOfWheels => VehicleField::NumberOfWheels,
            SortField::Capacity => VehicleField::Capacity,
            SortField::FuelType => VehicleField::FuelType,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `desc` solo con coincidencia exacta sin distinguir mayúsculas
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(order) if order.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Sort {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Cláusula ORDER BY. Desempata por id ascendente.
    /// Los textos se ordenan por bytes (`COLLATE "C"`), como en memoria.
    pub fn sql(&self) -> String {
        let column = match self.field {
            SortField::Name | SortField::FuelType => {
                format!("{} COLLATE \"C\"", self.field.field().column())
            }
            _ => self.field.field().column().to_string(),
        };
        let direction = match self.order {
            SortOrder::Asc => "ASC NULLS LAST",
            SortOrder::Desc => "DESC NULLS FIRST",
        };
        if self.field == SortField::Id {
            format!("{column} {direction}")
        } else {
            format!("{column} {direction}, v.id ASC")
        }
    }

    /// Mismo orden que `sql()` para el store en memoria
    pub fn compare(&self, a: &Vehicle, b: &Vehicle) -> Ordering {
        let primary = self.field.field().compare(a, b);
        let primary = match self.order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

/// Parámetros de página sin normalizar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

/// Página normalizada, lista para el store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPage {
    pub page: i64,
    pub size: i64,
    pub sort: Sort,
}

impl ResolvedPage {
    /// Satura en `i64::MAX` para páginas enormes
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.size)
    }

    pub fn limit(&self) -> i64 {
        self.size
    }
}

impl PageRequest {
    pub fn new(page: i64, size: i64) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
            ..Self::default()
        }
    }

    /// Página tal como la pidió el cliente (1 si no la indicó)
    pub fn requested_page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    pub fn resolve(&self) -> ResolvedPage {
        let page = self.requested_page().max(1);
        let size = self
            .size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let sort = Sort::new(
            SortField::parse(self.sort.as_deref()),
            SortOrder::parse(self.order.as_deref()),
        );
        ResolvedPage { page, size, sort }
    }
}

/// Sobre de página devuelto por el listado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

impl<T> PageEnvelope<T> {
    pub fn new(content: Vec<T>, total_elements: i64, size: i64, current_page: i64) -> Self {
        Self {
            content,
            total_elements,
            total_pages: total_pages(total_elements, size),
            current_page,
        }
    }

    pub fn empty(current_page: i64) -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            current_page,
        }
    }
}

pub fn total_pages(total_elements: i64, size: i64) -> i64 {
    if total_elements <= 0 || size <= 0 {
        return 0;
    }
    (total_elements + size - 1) / size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let resolved = PageRequest::default().resolve();
        assert_eq!(resolved.page, 1);
        assert_eq!(resolved.size, 20);
        assert_eq!(resolved.sort, Sort::default());
        assert_eq!(resolved.offset(), 0);
    }

    #[test]
    fn test_page_and_size_clamping() {
        let resolved = PageRequest::new(0, 25).resolve();
        assert_eq!(resolved.page, 1);
        assert_eq!(resolved.size, 25);

        assert_eq!(PageRequest::new(3, 1000).resolve().size, 100);
        assert_eq!(PageRequest::new(-2, 0).resolve().size, 1);
        assert_eq!(PageRequest::new(3, 10).resolve().offset(), 20);
    }

    #[test]
    fn test_sort_allow_list() {
        assert_eq!(SortField::parse(Some("enginePower")), SortField::EnginePower);
        assert_eq!(SortField::parse(Some("creationDate")), SortField::Id);
        assert_eq!(SortField::parse(Some("engine_power")), SortField::Id);
        assert_eq!(SortField::parse(None), SortField::Id);
    }

    #[test]
    fn test_sort_order() {
        assert_eq!(SortOrder::parse(Some("DESC")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(Some("descending")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(None), SortOrder::Asc);
    }

    #[test]
    fn test_sort_sql() {
        assert_eq!(Sort::default().sql(), "v.id ASC NULLS LAST");
        assert_eq!(
            Sort::new(SortField::Capacity, SortOrder::Desc).sql(),
            "v.capacity DESC NULLS FIRST, v.id ASC"
        );
        assert_eq!(
            Sort::new(SortField::Name, SortOrder::Asc).sql(),
            "v.name COLLATE \"C\" ASC NULLS LAST, v.id ASC"
        );
    }

    #[test]
    fn test_name_sort_is_byte_order() {
        let named = |id: i32, name: &str| Vehicle {
            id,
            name: name.to_string(),
            coordinates: crate::models::Coordinates { x: 0, y: 0 },
            creation_date: chrono::Utc::now(),
            engine_power: None,
            number_of_wheels: None,
            capacity: 1.0,
            fuel_type: crate::models::FuelType::Diesel,
        };
        let mut vehicles = vec![named(1, "alpha"), named(2, "Zeta"), named(3, "Beta")];
        let sort = Sort::new(SortField::Name, SortOrder::Asc);
        vehicles.sort_by(|a, b| sort.compare(a, b));

        let names: Vec<&str> = vehicles.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Zeta", "alpha"]);
    }

    #[test]
    fn test_offset_saturates_on_huge_pages() {
        let resolved = PageRequest::new(i64::MAX, 100).resolve();
        assert_eq!(resolved.offset(), i64::MAX);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(60, 20), 3);
    }
}
