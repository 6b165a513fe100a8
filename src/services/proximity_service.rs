//! Búsqueda por proximidad
//!
//! El servicio principal no filtra por distancia, así que se drena la
//! colección completa y se filtra aquí.

use crate::models::Vehicle;
use crate::query::SearchCriteria;
use crate::utils::errors::{AppError, AppResult};

use super::pagination_aggregator::{PaginationAggregator, WithinRadius};

#[derive(Clone)]
pub struct ProximitySearchService {
    aggregator: PaginationAggregator,
}

impl ProximitySearchService {
    pub fn new(aggregator: PaginationAggregator) -> Self {
        Self { aggregator }
    }

    /// Vehículos a distancia euclídea `<= max_distance` de `(x, y)`
    pub async fn search_by_coordinates(
        &self,
        x: i64,
        y: i64,
        max_distance: i64,
    ) -> AppResult<Vec<Vehicle>> {
        if max_distance < 0 {
            return Err(AppError::BadRequest(
                "max_distance must be greater than or equal to 0".to_string(),
            ));
        }

        let circle = WithinRadius {
            x,
            y,
            radius: max_distance,
        };
        let found = self
            .aggregator
            .drain_and_filter(&SearchCriteria::default(), &circle)
            .await?;

        log::info!(
            "📍 {} vehicles within {} of ({}, {})",
            found.len(),
            max_distance,
            x,
            y
        );
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{vehicle, FakeCollection};
    use std::sync::Arc;
    use std::time::Duration;

    fn service(collection: FakeCollection) -> ProximitySearchService {
        ProximitySearchService::new(PaginationAggregator::new(
            Arc::new(collection),
            4,
            Duration::from_secs(5),
        ))
    }

    #[tokio::test]
    async fn test_search_by_coordinates() {
        let collection = FakeCollection::with_vehicles(vec![
            vehicle(1, 10, 10),
            vehicle(2, 13, 14),
            vehicle(3, 14, 14),
            vehicle(4, -10, -10),
        ]);

        let found = service(collection)
            .search_by_coordinates(10, 10, 5)
            .await
            .unwrap();
        let ids: Vec<i32> = found.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_zero_distance_matches_exact_point() {
        let collection = FakeCollection::with_vehicles(vec![vehicle(1, 7, 7), vehicle(2, 7, 8)]);
        let found = service(collection)
            .search_by_coordinates(7, 7, 0)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_negative_distance_is_bad_request() {
        let result = service(FakeCollection::with_vehicles(Vec::new()))
            .search_by_coordinates(0, 0, -1)
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_bad_gateway() {
        let vehicles = (1..=50).map(|id| vehicle(id, 0, 0)).collect();
        let result = service(FakeCollection::with_vehicles(vehicles).failing_on(3))
            .search_by_coordinates(0, 0, 1)
            .await;
        let err = result.unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_GATEWAY);
    }
}
