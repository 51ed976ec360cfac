//! HTTP handlers for manual location ceilings

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::capacity::SetLocationCapacityInput;
use crate::services::inventory::LocationCapacityRow;
use crate::services::{CapacityService, InventoryService};
use crate::AppState;

/// Set or clear a location's manual carton ceiling
pub async fn set_location_capacity(
    State(state): State<AppState>,
    Json(input): Json<SetLocationCapacityInput>,
) -> AppResult<Json<LocationCapacityRow>> {
    let service = CapacityService::new(state.db);
    let row = service.set_location_override(input).await?;
    Ok(Json(row))
}

/// All locations with a stored ceiling row
pub async fn list_location_capacities(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<LocationCapacityRow>>> {
    let service = InventoryService::new(state.db);
    let rows = service.fetch_location_overrides().await?;
    Ok(Json(rows))
}
