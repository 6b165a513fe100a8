//! Cliente HTTP para el servicio principal de vehículos
//!
//! Habla con `/api/vehicles` usando reqwest. Un 404 se traduce a
//! `UpstreamError::NotFound`; cualquier otro código no 2xx a
//! `UpstreamError::Status`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use super::{RemotePage, RemoteVehicleCollection, UpstreamError, UpstreamResult};
use crate::config::UpstreamConfig;
use crate::models::{Vehicle, VehiclePatch};
use crate::query::SearchCriteria;

/// Cliente HTTP del servicio de vehículos
#[derive(Debug, Clone)]
pub struct VehiclesApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl VehiclesApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> UpstreamResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &UpstreamConfig) -> UpstreamResult<Self> {
        Self::new(config.base_url.clone(), config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn vehicles_url(&self) -> String {
        format!("{}/api/vehicles", self.base_url)
    }

    fn vehicle_url(&self, id: i32) -> String {
        format!("{}/api/vehicles/{}", self.base_url, id)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> UpstreamResult<T> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| UpstreamError::Decode(e.to_string())),
            StatusCode::NOT_FOUND => Err(UpstreamError::NotFound(format!(
                "Resource not found upstream: {}",
                url
            ))),
            status => Err(UpstreamError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }

    fn transport_error(&self, error: reqwest::Error) -> UpstreamError {
        if error.is_timeout() {
            UpstreamError::Timeout(self.timeout)
        } else {
            UpstreamError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl RemoteVehicleCollection for VehiclesApiClient {
    async fn fetch_page(
        &self,
        filter: &SearchCriteria,
        page: i64,
        size: i64,
    ) -> UpstreamResult<RemotePage> {
        let url = self.vehicles_url();
        log::debug!("📄 Fetching page {} (size {}) from {}", page, size, url);

        let request = self
            .client
            .get(&url)
            .query(filter)
            .query(&[("page", page), ("size", size)]);

        self.send(request, &url).await
    }

    async fn get(&self, id: i32) -> UpstreamResult<Vehicle> {
        let url = self.vehicle_url(id);
        let request = self.client.get(&url);
        self.send(request, &url).await.map_err(|e| match e {
            UpstreamError::NotFound(_) => {
                UpstreamError::NotFound(format!("Vehicle with id '{}' not found", id))
            }
            other => other,
        })
    }

    async fn patch(&self, id: i32, patch: &VehiclePatch) -> UpstreamResult<Vehicle> {
        let url = self.vehicle_url(id);
        let request = self.client.patch(&url).json(patch);
        self.send(request, &url).await.map_err(|e| match e {
            UpstreamError::NotFound(_) => {
                UpstreamError::NotFound(format!("Vehicle with id '{}' not found", id))
            }
            other => other,
        })
    }
}
