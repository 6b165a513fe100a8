//! Clients - HTTP Clients for External APIs
//!
//! Los servicios derivados (shop, reports) consumen el servicio principal de
//! vehículos a través de `RemoteVehicleCollection`.

pub mod vehicles_client;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Vehicle, VehiclePatch};
use crate::query::SearchCriteria;

pub use vehicles_client::VehiclesApiClient;

/// Errores al hablar con el servicio principal
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("{0}")]
    NotFound(String),

    #[error("upstream returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid upstream payload: {0}")]
    Decode(String),

    #[error("upstream did not answer within {0:?}")]
    Timeout(Duration),
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Página remota: sólo lo que necesita el drenado
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePage {
    pub content: Vec<Vehicle>,
    pub total_pages: i64,
}

/// Colección paginada de vehículos en otro servicio
#[async_trait]
pub trait RemoteVehicleCollection: Send + Sync {
    /// Página `page` (base 1) de tamaño `size` filtrada en el servidor
    async fn fetch_page(
        &self,
        filter: &SearchCriteria,
        page: i64,
        size: i64,
    ) -> UpstreamResult<RemotePage>;

    async fn get(&self, id: i32) -> UpstreamResult<Vehicle>;

    async fn patch(&self, id: i32, patch: &VehiclePatch) -> UpstreamResult<Vehicle>;
}
