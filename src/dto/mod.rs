//! DTOs de la API HTTP

pub mod report_dto;
pub mod vehicle_dto;

pub use report_dto::*;
pub use vehicle_dto::*;
