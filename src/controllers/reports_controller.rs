use crate::dto::report_dto::{CoordinatesSearchQuery, MaintenanceReportQuery};
use crate::models::{MaintenanceReport, Vehicle};
use crate::services::{ProximitySearchService, ReportService};
use crate::state::ReportsState;
use crate::utils::errors::AppResult;

pub struct ReportsController {
    reports: ReportService,
    proximity: ProximitySearchService,
}

impl ReportsController {
    pub fn new(state: &ReportsState) -> Self {
        Self {
            reports: state.reports.clone(),
            proximity: state.proximity.clone(),
        }
    }

    pub async fn maintenance_report(
        &self,
        vehicle_id: i64,
        query: MaintenanceReportQuery,
    ) -> AppResult<MaintenanceReport> {
        let format = query.format()?;
        self.reports
            .maintenance_report(vehicle_id, format, query.options())
            .await
    }

    pub async fn search_by_coordinates(
        &self,
        query: CoordinatesSearchQuery,
    ) -> AppResult<Vec<Vehicle>> {
        self.proximity
            .search_by_coordinates(query.x, query.y, query.max_distance)
            .await
    }
}
