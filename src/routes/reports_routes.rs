use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::ReportsController;
use crate::dto::report_dto::{CoordinatesSearchQuery, MaintenanceReportQuery};
use crate::models::{MaintenanceReport, Vehicle};
use crate::state::ReportsState;
use crate::utils::errors::AppError;
use crate::utils::validation::{ApiPath, ApiQuery};

pub fn create_reports_router() -> Router<ReportsState> {
    Router::new().route("/maintenance/:vehicle_id", get(maintenance_report))
}

/// Búsquedas que el servicio principal no ofrece, bajo `/api/vehicles`
pub fn create_vehicle_search_router() -> Router<ReportsState> {
    Router::new().route("/search/by-coordinates", get(search_by_coordinates))
}

async fn maintenance_report(
    State(state): State<ReportsState>,
    ApiPath(vehicle_id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<MaintenanceReportQuery>,
) -> Result<Json<MaintenanceReport>, AppError> {
    let controller = ReportsController::new(&state);
    Ok(Json(controller.maintenance_report(vehicle_id, query).await?))
}

async fn search_by_coordinates(
    State(state): State<ReportsState>,
    ApiQuery(query): ApiQuery<CoordinatesSearchQuery>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = ReportsController::new(&state);
    Ok(Json(controller.search_by_coordinates(query).await?))
}
