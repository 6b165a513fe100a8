//! Modelo de reportes de mantenimiento
//!
//! Estructuras que devuelve el servicio de reportes para un vehículo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::vehicle::Vehicle;

/// Registro individual de mantenimiento
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: i32,
    pub date: DateTime<Utc>,
    pub mileage: i32,
    pub description: String,
    pub cost: f64,
    pub parts_replaced: Vec<String>,
    pub technician: String,
    pub duration_hours: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceStatistics {
    pub average_cost_per_maintenance: f64,
    pub total_downtime_hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Reporte de mantenimiento completo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceReport {
    pub vehicle_id: i32,
    pub vehicle_info: Vehicle,
    pub report_period: ReportPeriod,
    pub total_maintenance_count: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_records: Option<Vec<MaintenanceRecord>>,
    pub statistics: MaintenanceStatistics,
    pub generated_at: DateTime<Utc>,
}

/// Opciones del reporte (query string del endpoint)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub include_details: bool,
    pub include_costs: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_details: true,
            include_costs: true,
        }
    }
}
