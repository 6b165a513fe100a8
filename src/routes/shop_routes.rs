use axum::{
    extract::State,
    routing::{get, patch},
    Json, Router,
};

use crate::controllers::ShopController;
use crate::models::Vehicle;
use crate::state::ShopState;
use crate::utils::errors::AppError;
use crate::utils::validation::ApiPath;

pub fn create_shop_router() -> Router<ShopState> {
    Router::new()
        .route("/search/by-engine-power/:from/:to", get(search_by_engine_power))
        .route("/add-wheels/:vehicle_id/:number_of_wheels", patch(add_wheels))
}

async fn search_by_engine_power(
    State(state): State<ShopState>,
    ApiPath((from, to)): ApiPath<(i64, i64)>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = ShopController::new(&state);
    Ok(Json(controller.search_by_engine_power(from, to).await?))
}

async fn add_wheels(
    State(state): State<ShopState>,
    ApiPath((vehicle_id, number_of_wheels)): ApiPath<(i64, i64)>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = ShopController::new(&state);
    Ok(Json(controller.add_wheels(vehicle_id, number_of_wheels).await?))
}
