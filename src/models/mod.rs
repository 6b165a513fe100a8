//! Modelos de datos
//!
//! Este módulo contiene los modelos de dominio compartidos por el servicio
//! primario y los servicios derivados.

pub mod maintenance;
pub mod vehicle;

pub use maintenance::*;
pub use vehicle::*;
