//! Controladores: traducen DTOs a llamadas de servicio

pub mod reports_controller;
pub mod shop_controller;
pub mod vehicle_controller;

pub use reports_controller::ReportsController;
pub use shop_controller::ShopController;
pub use vehicle_controller::VehicleController;
