use crate::models::Vehicle;
use crate::services::ShopService;
use crate::state::ShopState;
use crate::utils::errors::AppResult;

pub struct ShopController {
    service: ShopService,
}

impl ShopController {
    pub fn new(state: &ShopState) -> Self {
        Self {
            service: state.shop.clone(),
        }
    }

    pub async fn search_by_engine_power(&self, from: i64, to: i64) -> AppResult<Vec<Vehicle>> {
        self.service.search_by_engine_power(from, to).await
    }

    pub async fn add_wheels(&self, vehicle_id: i64, number_of_wheels: i64) -> AppResult<Vehicle> {
        self.service.add_wheels(vehicle_id, number_of_wheels).await
    }
}
