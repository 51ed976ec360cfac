//! Bin status handler

use axum::{extract::State, Json};
use shared::BinStatusRow;

use crate::error::AppResult;
use crate::services::{InventoryService, ReportingService};
use crate::AppState;

/// Occupancy status for every location in a recognized aisle
pub async fn get_bin_status(State(state): State<AppState>) -> AppResult<Json<Vec<BinStatusRow>>> {
    let service = ReportingService::new(
        InventoryService::new(state.db),
        state.config.warehouse.report_settings(),
    );
    let rows = service.get_bin_status().await?;
    Ok(Json(rows))
}
