//! Inventario de vehículos
//!
//! Servicio principal (CRUD con filtrado, orden y paginación) y dos servicios
//! derivados que lo consumen por HTTP: tienda y reportes.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod query;
pub mod repositories;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;
