//! Store en memoria
//!
//! Misma semántica que `PgVehicleStore` (filtro, orden y paginación) sobre un
//! `BTreeMap` protegido por un `RwLock`. Se usa con `STORE_BACKEND=memory` y en
//! los tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{StoreResult, VehicleStore};
use crate::models::{NewVehicle, Vehicle, VehiclePatch};
use crate::query::{Predicate, Sort};

#[derive(Debug)]
struct MemoryState {
    next_id: i32,
    vehicles: BTreeMap<i32, Vehicle>,
}

#[derive(Debug)]
pub struct InMemoryVehicleStore {
    state: RwLock<MemoryState>,
}

impl Default for InMemoryVehicleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryVehicleStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                next_id: 1,
                vehicles: BTreeMap::new(),
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.vehicles.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl VehicleStore for InMemoryVehicleStore {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Vehicle>> {
        Ok(self.state.read().await.vehicles.get(&id).cloned())
    }

    async fn insert(&self, vehicle: NewVehicle) -> StoreResult<Vehicle> {
        let mut state = self.state.write().await;
        let id = state.next_id;
        state.next_id += 1;

        let vehicle = vehicle.into_vehicle(id, Utc::now());
        state.vehicles.insert(id, vehicle.clone());

        log::info!("🚗 Vehicle {} created (memory)", id);
        Ok(vehicle)
    }

    async fn update(&self, id: i32, patch: &VehiclePatch) -> StoreResult<Option<Vehicle>> {
        let mut state = self.state.write().await;
        Ok(state.vehicles.get_mut(&id).map(|vehicle| {
            patch.apply_to(vehicle);
            vehicle.clone()
        }))
    }

    async fn delete(&self, id: i32) -> StoreResult<bool> {
        Ok(self.state.write().await.vehicles.remove(&id).is_some())
    }

    async fn count(&self, predicate: &Predicate) -> StoreResult<i64> {
        let state = self.state.read().await;
        let total = state
            .vehicles
            .values()
            .filter(|vehicle| predicate.matches(vehicle))
            .count();
        Ok(total as i64)
    }

    async fn query(
        &self,
        predicate: &Predicate,
        sort: &Sort,
        offset: i64,
        limit: Option<i64>,
    ) -> StoreResult<Vec<Vehicle>> {
        let state = self.state.read().await;
        let mut matching: Vec<&Vehicle> = state
            .vehicles
            .values()
            .filter(|vehicle| predicate.matches(vehicle))
            .collect();
        matching.sort_by(|a, b| sort.compare(a, b));

        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = limit
            .and_then(|limit| usize::try_from(limit).ok())
            .unwrap_or(usize::MAX);

        Ok(matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn average_engine_power(&self) -> StoreResult<Option<f64>> {
        let state = self.state.read().await;
        let powers: Vec<i64> = state
            .vehicles
            .values()
            .filter_map(|vehicle| vehicle.engine_power)
            .collect();

        if powers.is_empty() {
            return Ok(None);
        }
        let sum: f64 = powers.iter().map(|power| *power as f64).sum();
        Ok(Some(sum / powers.len() as f64))
    }
}
