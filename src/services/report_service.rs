//! Servicio de reportes de mantenimiento
//!
//! El historial de mantenimiento es fijo; sólo los datos del vehículo y el
//! periodo vienen del servicio principal.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Months, Utc};

use crate::clients::{RemoteVehicleCollection, UpstreamError};
use crate::models::{
    MaintenanceRecord, MaintenanceReport, MaintenanceStatistics, ReportOptions, ReportPeriod,
};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::validate_min;

const TOTAL_MAINTENANCE_COUNT: i32 = 5;
const TOTAL_COST: f64 = 15000.0;
const AVERAGE_COST_PER_MAINTENANCE: f64 = 3000.0;
const TOTAL_DOWNTIME_HOURS: f64 = 48.5;

/// Formatos de salida soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Json,
}

impl FromStr for ReportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("json") {
            Ok(ReportFormat::Json)
        } else {
            Err(AppError::BadRequest(format!(
                "Unsupported report format '{}'",
                s
            )))
        }
    }
}

#[derive(Clone)]
pub struct ReportService {
    collection: Arc<dyn RemoteVehicleCollection>,
}

impl ReportService {
    pub fn new(collection: Arc<dyn RemoteVehicleCollection>) -> Self {
        Self { collection }
    }

    pub async fn maintenance_report(
        &self,
        vehicle_id: i64,
        format: ReportFormat,
        options: ReportOptions,
    ) -> AppResult<MaintenanceReport> {
        validate_min("vehicleId", vehicle_id, 1)?;
        let id = i32::try_from(vehicle_id).map_err(|_| vehicle_not_found())?;

        let vehicle = match self.collection.get(id).await {
            Ok(vehicle) => vehicle,
            Err(UpstreamError::NotFound(_)) => return Err(vehicle_not_found()),
            Err(e) => return Err(e.into()),
        };

        let now = Utc::now();
        log::info!("📋 Maintenance report for vehicle {} ({:?})", id, format);

        Ok(MaintenanceReport {
            vehicle_id: id,
            report_period: ReportPeriod {
                start_date: vehicle.creation_date,
                end_date: now,
            },
            vehicle_info: vehicle,
            total_maintenance_count: TOTAL_MAINTENANCE_COUNT,
            total_cost: options.include_costs.then_some(TOTAL_COST),
            maintenance_records: options.include_details.then(|| maintenance_history(now)),
            statistics: MaintenanceStatistics {
                average_cost_per_maintenance: AVERAGE_COST_PER_MAINTENANCE,
                total_downtime_hours: TOTAL_DOWNTIME_HOURS,
            },
            generated_at: now,
        })
    }
}

fn vehicle_not_found() -> AppError {
    AppError::NotFound("Vehicle wasn't found".to_string())
}

fn months_ago(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(months)).unwrap_or(now)
}

fn maintenance_history(now: DateTime<Utc>) -> Vec<MaintenanceRecord> {
    vec![
        MaintenanceRecord {
            id: 1,
            date: months_ago(now, 3),
            mileage: 10000,
            description: "Regular maintenance".to_string(),
            cost: 5000.0,
            parts_replaced: vec![
                "engine oil".to_string(),
                "oil filter".to_string(),
                "air filter".to_string(),
            ],
            technician: "Ivanov A.S.".to_string(),
            duration_hours: 2.5,
        },
        MaintenanceRecord {
            id: 2,
            date: months_ago(now, 6),
            mileage: 20000,
            description: "Brake pad replacement".to_string(),
            cost: 8000.0,
            parts_replaced: vec!["brake pads".to_string(), "brake fluid".to_string()],
            technician: "Petrov V.I.".to_string(),
            duration_hours: 3.0,
        },
        MaintenanceRecord {
            id: 3,
            date: months_ago(now, 1),
            mileage: 15000,
            description: "Spark plug replacement".to_string(),
            cost: 2000.0,
            parts_replaced: vec!["spark plugs".to_string()],
            technician: "Sidorov P.M.".to_string(),
            duration_hours: 1.5,
        },
    ]
}
