use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::VehicleController;
use crate::dto::vehicle_dto::{
    AverageEnginePowerResponse, CountResponse, CreateVehicleRequest, UpdateVehicleRequest,
    VehicleListQuery,
};
use crate::models::Vehicle;
use crate::query::PageEnvelope;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{ApiPath, ApiQuery, ValidatedJson};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:id",
            get(get_vehicle).patch(update_vehicle).delete(delete_vehicle),
        )
        .route("/search/name-starts-with/:prefix", get(search_by_name_prefix))
        .route("/stats/average-engine-power", get(average_engine_power))
        .route("/stats/count-by-wheels/:wheels", get(count_by_wheels))
}

async fn list_vehicles(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<VehicleListQuery>,
) -> Result<Json<PageEnvelope<Vehicle>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.list(query).await?))
}

async fn create_vehicle(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let controller = VehicleController::new(&state);
    let vehicle = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.get(id).await?))
}

async fn update_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<UpdateVehicleRequest>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, AppError> {
    let controller = VehicleController::new(&state);
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn search_by_name_prefix(
    State(state): State<AppState>,
    ApiPath(prefix): ApiPath<String>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.search_by_name_prefix(&prefix).await?))
}

async fn average_engine_power(
    State(state): State<AppState>,
) -> Result<Json<AverageEnginePowerResponse>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.average_engine_power().await?))
}

async fn count_by_wheels(
    State(state): State<AppState>,
    ApiPath(wheels): ApiPath<i64>,
) -> Result<Json<CountResponse>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.count_by_wheels(wheels).await?))
}
