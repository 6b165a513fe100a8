//! Services module
//!
//! Este módulo contiene la lógica de negocio y servicios de la aplicación.
//! `vehicle_service` y `vehicle_query_service` trabajan sobre el store local;
//! el resto consume el servicio principal por HTTP.

pub mod pagination_aggregator;
pub mod proximity_service;
pub mod report_service;
pub mod shop_service;
pub mod vehicle_query_service;
pub mod vehicle_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use pagination_aggregator::{
    AcceptAll, PaginationAggregator, RecordFilter, WithinRadius, DRAIN_PAGE_SIZE,
};
pub use proximity_service::ProximitySearchService;
pub use report_service::{ReportFormat, ReportService};
pub use shop_service::ShopService;
pub use vehicle_service::VehicleService;
