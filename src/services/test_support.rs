//! Colección remota en memoria para los tests de servicios derivados

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::clients::{RemotePage, RemoteVehicleCollection, UpstreamError, UpstreamResult};
use crate::models::{Coordinates, FuelType, Vehicle, VehiclePatch};
use crate::query::{compile, total_pages, SearchCriteria};

pub fn vehicle(id: i32, x: i64, y: i32) -> Vehicle {
    Vehicle {
        id,
        name: format!("vehicle {id}"),
        coordinates: Coordinates { x, y },
        creation_date: Utc::now(),
        engine_power: Some(id as i64 * 10),
        number_of_wheels: Some(4),
        capacity: 1.0,
        fuel_type: FuelType::Diesel,
    }
}

enum Layout {
    /// Filtra y trocea `vehicles` como lo haría el servicio principal
    Collection(Mutex<Vec<Vehicle>>),
    /// Páginas fijas, ignorando filtro y tamaño
    Pages(Vec<Vec<Vehicle>>),
}

pub struct FakeCollection {
    layout: Layout,
    failing_page: Option<i64>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    requested: Mutex<Vec<i64>>,
}

impl FakeCollection {
    pub fn with_vehicles(vehicles: Vec<Vehicle>) -> Self {
        Self::new(Layout::Collection(Mutex::new(vehicles)))
    }

    pub fn with_pages(pages: Vec<Vec<Vehicle>>) -> Self {
        Self::new(Layout::Pages(pages))
    }

    fn new(layout: Layout) -> Self {
        Self {
            layout,
            failing_page: None,
            delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, page: i64) -> Self {
        self.failing_page = Some(page);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn requested_pages(&self) -> Vec<i64> {
        let mut pages = self.requested.lock().unwrap().clone();
        pages.sort_unstable();
        pages
    }

    fn page_of(&self, filter: &SearchCriteria, page: i64, size: i64) -> RemotePage {
        match &self.layout {
            Layout::Pages(pages) => RemotePage {
                content: pages
                    .get((page - 1) as usize)
                    .cloned()
                    .unwrap_or_default(),
                total_pages: pages.len() as i64,
            },
            Layout::Collection(vehicles) => {
                let predicate = compile(filter);
                let mut matching: Vec<Vehicle> = vehicles
                    .lock()
                    .unwrap()
                    .iter()
                    .filter(|v| predicate.matches(v))
                    .cloned()
                    .collect();
                matching.sort_by_key(|v| v.id);
                let total = matching.len() as i64;
                RemotePage {
                    content: matching
                        .into_iter()
                        .skip(((page - 1) * size) as usize)
                        .take(size as usize)
                        .collect(),
                    total_pages: total_pages(total, size),
                }
            }
        }
    }
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RemoteVehicleCollection for FakeCollection {
    async fn fetch_page(
        &self,
        filter: &SearchCriteria,
        page: i64,
        size: i64,
    ) -> UpstreamResult<RemotePage> {
        self.requested.lock().unwrap().push(page);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        // Se descuenta también si el futuro se suelta a mitad del sleep
        let _guard = InFlightGuard(&self.in_flight);

        tokio::time::sleep(self.delay).await;

        if self.failing_page == Some(page) {
            return Err(UpstreamError::Status {
                status: 500,
                url: format!("fake://vehicles?page={page}"),
            });
        }
        Ok(self.page_of(filter, page, size))
    }

    async fn get(&self, id: i32) -> UpstreamResult<Vehicle> {
        let found = match &self.layout {
            Layout::Collection(vehicles) => {
                vehicles.lock().unwrap().iter().find(|v| v.id == id).cloned()
            }
            Layout::Pages(pages) => pages.iter().flatten().find(|v| v.id == id).cloned(),
        };
        found.ok_or_else(|| UpstreamError::NotFound(format!("Vehicle with id '{}' not found", id)))
    }

    async fn patch(&self, id: i32, patch: &VehiclePatch) -> UpstreamResult<Vehicle> {
        let Layout::Collection(vehicles) = &self.layout else {
            return Err(UpstreamError::Transport("read-only fake".to_string()));
        };
        let mut vehicles = vehicles.lock().unwrap();
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| UpstreamError::NotFound(format!("Vehicle with id '{}' not found", id)))?;
        patch.apply_to(vehicle);
        Ok(vehicle.clone())
    }
}
