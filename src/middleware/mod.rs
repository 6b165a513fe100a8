//! Middleware del sistema
//!
//! Capas HTTP compartidas por los tres servicios.

pub mod cors;

pub use cors::*;
