use serde::{Deserialize, Serialize};

use crate::models::ReportOptions;
use crate::services::ReportFormat;
use crate::utils::errors::AppResult;

// Query del reporte de mantenimiento
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MaintenanceReportQuery {
    pub format: Option<String>,
    pub include_details: Option<bool>,
    pub include_costs: Option<bool>,
}

impl MaintenanceReportQuery {
    /// `json` por defecto; cualquier otro formato es un 400
    pub fn format(&self) -> AppResult<ReportFormat> {
        match self.format.as_deref() {
            None | Some("") => Ok(ReportFormat::default()),
            Some(raw) => raw.parse(),
        }
    }

    pub fn options(&self) -> ReportOptions {
        let defaults = ReportOptions::default();
        ReportOptions {
            include_details: self.include_details.unwrap_or(defaults.include_details),
            include_costs: self.include_costs.unwrap_or(defaults.include_costs),
        }
    }
}

// Query de búsqueda por coordenadas
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CoordinatesSearchQuery {
    pub x: i64,
    pub y: i64,
    pub max_distance: i64,
}
