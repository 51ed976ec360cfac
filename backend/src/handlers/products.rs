//! HTTP handlers for product administration

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::product::{PalletCapacity, PalletCapacityInput};
use crate::services::ProductService;
use crate::AppState;

/// Set a product's pallet carton capacity
pub async fn set_pallet_capacity(
    State(state): State<AppState>,
    Json(input): Json<PalletCapacityInput>,
) -> AppResult<Json<PalletCapacity>> {
    let service = ProductService::new(state.db);
    let product = service.update_pallet_capacity(input).await?;
    Ok(Json(product))
}
