//! Repositorios
//!
//! El trait `VehicleStore` es el único punto de acceso a los datos de
//! vehículos. Hay dos implementaciones: PostgreSQL (sqlx) y memoria.

pub mod memory_repository;
pub mod vehicle_repository;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewVehicle, Vehicle, VehiclePatch};
use crate::query::{Predicate, Sort};

pub use memory_repository::InMemoryVehicleStore;
pub use vehicle_repository::PgVehicleStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait VehicleStore: Send + Sync {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Vehicle>>;

    async fn insert(&self, vehicle: NewVehicle) -> StoreResult<Vehicle>;

    /// Merge-patch. `None` si el id no existe.
    async fn update(&self, id: i32, patch: &VehiclePatch) -> StoreResult<Option<Vehicle>>;

    /// `false` si el id no existe.
    async fn delete(&self, id: i32) -> StoreResult<bool>;

    async fn count(&self, predicate: &Predicate) -> StoreResult<i64>;

    /// `limit = None` devuelve todo desde `offset`.
    async fn query(
        &self,
        predicate: &Predicate,
        sort: &Sort,
        offset: i64,
        limit: Option<i64>,
    ) -> StoreResult<Vec<Vehicle>>;

    /// Promedio sobre los vehículos con potencia conocida. `None` si no hay ninguno.
    async fn average_engine_power(&self) -> StoreResult<Option<f64>>;
}
