//! Agregador de paginación remota
//!
//! Recorre todas las páginas de una colección remota (página 1, después
//! `2..=total_pages` con concurrencia acotada), descarta ids repetidos y
//! aplica un filtro local que el servicio remoto no sabe hacer.
//!
//! Si una página falla, el drenado entero falla: no hay resultado parcial
//! ni reintentos. Soltar el futuro (o agotar `timeout`) cancela todas las
//! peticiones en vuelo.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::clients::{RemoteVehicleCollection, UpstreamError, UpstreamResult};
use crate::config::UpstreamConfig;
use crate::models::Vehicle;
use crate::query::SearchCriteria;

/// Tamaño de página fijo para el drenado
pub const DRAIN_PAGE_SIZE: i64 = 20;

/// Filtro aplicado localmente tras el drenado
pub trait RecordFilter: Send + Sync {
    fn accept(&self, vehicle: &Vehicle) -> bool;
}

/// Acepta todo
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl RecordFilter for AcceptAll {
    fn accept(&self, _vehicle: &Vehicle) -> bool {
        true
    }
}

/// Círculo de radio `radius` centrado en `(x, y)`, borde incluido
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithinRadius {
    pub x: i64,
    pub y: i64,
    pub radius: i64,
}

impl RecordFilter for WithinRadius {
    fn accept(&self, vehicle: &Vehicle) -> bool {
        // i128: las diferencias de i64 al cuadrado no caben en i64
        let dx = vehicle.coordinates.x as i128 - self.x as i128;
        let dy = vehicle.coordinates.y as i128 - self.y as i128;
        let radius = self.radius as i128;

        // Si ni siquiera cabe en i128 está fuera de cualquier radio i64
        dx.checked_mul(dx)
            .zip(dy.checked_mul(dy))
            .and_then(|(dx2, dy2)| dx2.checked_add(dy2))
            .map(|distance2| distance2 <= radius * radius)
            .unwrap_or(false)
    }
}

impl<F> RecordFilter for F
where
    F: Fn(&Vehicle) -> bool + Send + Sync,
{
    fn accept(&self, vehicle: &Vehicle) -> bool {
        self(vehicle)
    }
}

#[derive(Clone)]
pub struct PaginationAggregator {
    collection: Arc<dyn RemoteVehicleCollection>,
    concurrency: usize,
    timeout: Duration,
}

impl PaginationAggregator {
    pub fn new(
        collection: Arc<dyn RemoteVehicleCollection>,
        concurrency: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            collection,
            concurrency: concurrency.max(1),
            timeout,
        }
    }

    pub fn from_config(
        collection: Arc<dyn RemoteVehicleCollection>,
        config: &UpstreamConfig,
    ) -> Self {
        Self::new(collection, config.drain_concurrency, config.drain_timeout)
    }

    /// Drenar todas las páginas con `server_filter` y quedarse con lo que
    /// acepte `local_filter`. Un resultado vacío es válido.
    pub async fn drain_and_filter(
        &self,
        server_filter: &SearchCriteria,
        local_filter: &dyn RecordFilter,
    ) -> UpstreamResult<Vec<Vehicle>> {
        let drained = tokio::time::timeout(self.timeout, self.drain(server_filter))
            .await
            .map_err(|_| {
                log::error!("⏱️ Drain exceeded {:?}", self.timeout);
                UpstreamError::Timeout(self.timeout)
            })??;

        let total = drained.len();
        let accepted: Vec<Vehicle> = drained
            .into_iter()
            .filter(|vehicle| local_filter.accept(vehicle))
            .collect();

        log::info!("🔎 Drained {} vehicles, {} accepted", total, accepted.len());
        Ok(accepted)
    }

    async fn drain(&self, filter: &SearchCriteria) -> UpstreamResult<Vec<Vehicle>> {
        let first = self
            .collection
            .fetch_page(filter, 1, DRAIN_PAGE_SIZE)
            .await?;
        let total_pages = first.total_pages;

        let mut seen = HashSet::new();
        let mut records = Vec::new();
        keep_unseen(&mut seen, &mut records, first.content);

        if total_pages <= 1 {
            return Ok(records);
        }

        log::debug!(
            "📚 Draining pages 2..={} ({} in flight)",
            total_pages,
            self.concurrency
        );

        let mut pending = stream::iter(2..=total_pages)
            .map(|page| async move {
                self.collection
                    .fetch_page(filter, page, DRAIN_PAGE_SIZE)
                    .await
                    .map(|remote| (page, remote.content))
            })
            .buffer_unordered(self.concurrency);

        let mut pages = Vec::new();
        while let Some(result) = pending.next().await {
            match result {
                Ok(page) => pages.push(page),
                Err(e) => {
                    log::error!("❌ Page fetch failed, aborting drain: {}", e);
                    return Err(e);
                }
            }
        }

        // Orden de página para que la deduplicación sea determinista
        pages.sort_by_key(|(page, _)| *page);
        for (_, content) in pages {
            keep_unseen(&mut seen, &mut records, content);
        }

        Ok(records)
    }
}

fn keep_unseen(seen: &mut HashSet<i32>, records: &mut Vec<Vehicle>, content: Vec<Vehicle>) {
    for vehicle in content {
        if seen.insert(vehicle.id) {
            records.push(vehicle);
        }
    }
}
