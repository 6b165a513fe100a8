//! Servicio de vehículos
//!
//! Lógica de negocio del servicio principal sobre un `VehicleStore`.

use std::sync::Arc;

use crate::models::{NewVehicle, Vehicle, VehiclePatch};
use crate::query::{compile, PageEnvelope, PageRequest, Predicate, SearchCriteria, Sort};
use crate::repositories::VehicleStore;
use crate::utils::errors::{not_found_error, AppError, AppResult};

use super::vehicle_query_service;

#[derive(Clone)]
pub struct VehicleService {
    store: Arc<dyn VehicleStore>,
}

impl VehicleService {
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self { store }
    }

    /// Listado filtrado, ordenado y paginado
    pub async fn list(
        &self,
        criteria: &SearchCriteria,
        page: &PageRequest,
    ) -> AppResult<PageEnvelope<Vehicle>> {
        let inverted = criteria.inverted_ranges();
        if !inverted.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Invalid range for: {}",
                inverted.join(", ")
            )));
        }

        let predicate = compile(criteria);
        Ok(vehicle_query_service::execute(self.store.as_ref(), &predicate, page).await?)
    }

    pub async fn get(&self, id: i32) -> AppResult<Vehicle> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    pub async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        Ok(self.store.insert(vehicle).await?)
    }

    /// Merge patch: los campos ausentes no se tocan
    pub async fn update(&self, id: i32, patch: &VehiclePatch) -> AppResult<Vehicle> {
        let updated = self
            .store
            .update(id, patch)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        log::info!("✏️ Vehicle {} updated", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(not_found_error("Vehicle", id));
        }
        log::info!("🗑️ Vehicle {} deleted", id);
        Ok(())
    }

    /// Vehículos cuyo nombre empieza por `prefix` (sin distinguir mayúsculas)
    pub async fn search_by_name_prefix(&self, prefix: &str) -> AppResult<Vec<Vehicle>> {
        let predicate = Predicate::name_starts_with(prefix);
        Ok(self
            .store
            .query(&predicate, &Sort::default(), 0, None)
            .await?)
    }

    pub async fn average_engine_power(&self) -> AppResult<f64> {
        self.store
            .average_engine_power()
            .await?
            .ok_or_else(|| AppError::EmptyAggregate("No vehicles in collection".to_string()))
    }

    pub async fn count_by_wheels(&self, number_of_wheels: i64) -> AppResult<i64> {
        let predicate = Predicate::wheels_equal(number_of_wheels);
        Ok(self.store.count(&predicate).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, FuelType};
    use crate::repositories::InMemoryVehicleStore;

    fn service() -> VehicleService {
        VehicleService::new(Arc::new(InMemoryVehicleStore::new()))
    }

    fn new_vehicle(name: &str, engine_power: Option<i64>, wheels: Option<i64>) -> NewVehicle {
        NewVehicle {
            name: name.to_string(),
            coordinates: Coordinates { x: 3, y: 4 },
            engine_power,
            number_of_wheels: wheels,
            capacity: 2.5,
            fuel_type: FuelType::Alcohol,
        }
    }

    #[tokio::test]
    async fn test_missing_vehicle_is_not_found() {
        let service = service();
        assert!(matches!(service.get(1).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.delete(1).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            service.update(1, &VehiclePatch::number_of_wheels(6)).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_merge_patch_keeps_absent_fields() {
        let service = service();
        let created = service
            .create(new_vehicle("Tractor", Some(90), Some(4)))
            .await
            .unwrap();

        let updated = service
            .update(created.id, &VehiclePatch::number_of_wheels(6))
            .await
            .unwrap();
        assert_eq!(updated.number_of_wheels, Some(6));
        assert_eq!(updated.name, "Tractor");
        assert_eq!(updated.engine_power, Some(90));
        assert_eq!(updated.creation_date, created.creation_date);
    }

    #[tokio::test]
    async fn test_inverted_range_is_bad_request() {
        let service = service();
        let criteria = SearchCriteria::engine_power_between(Some(10), Some(1));
        let result = service.list(&criteria, &PageRequest::default()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_name_prefix_is_case_insensitive() {
        let service = service();
        service.create(new_vehicle("Truck", None, None)).await.unwrap();
        service.create(new_vehicle("trolley", None, None)).await.unwrap();
        service.create(new_vehicle("Bus", None, None)).await.unwrap();

        let found = service.search_by_name_prefix("TR").await.unwrap();
        let names: Vec<&str> = found.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Truck", "trolley"]);
    }

    #[tokio::test]
    async fn test_average_engine_power_on_empty_collection() {
        let service = service();
        assert!(matches!(
            service.average_engine_power().await,
            Err(AppError::EmptyAggregate(_))
        ));

        service.create(new_vehicle("a", Some(10), None)).await.unwrap();
        service.create(new_vehicle("b", Some(20), None)).await.unwrap();
        assert_eq!(service.average_engine_power().await.unwrap(), 15.0);
    }

    #[tokio::test]
    async fn test_count_by_wheels_is_exact() {
        let service = service();
        service.create(new_vehicle("a", None, Some(4))).await.unwrap();
        service.create(new_vehicle("b", None, Some(6))).await.unwrap();
        service.create(new_vehicle("c", None, None)).await.unwrap();

        assert_eq!(service.count_by_wheels(4).await.unwrap(), 1);
        assert_eq!(service.count_by_wheels(3).await.unwrap(), 0);
    }
}
