//! HTTP handlers for the location optimizer

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::{AisleList, FilterOptions, OptimizerFilter, OptimizerLocation};

use crate::error::AppResult;
use crate::services::capacity::SetRackCapacityInput;
use crate::services::inventory::RackCapacityRow;
use crate::services::reporting::CapacityLookup;
use crate::services::{CapacityService, InventoryService, ReportingService};
use crate::AppState;

fn reporting_service(state: AppState) -> ReportingService {
    ReportingService::new(
        InventoryService::new(state.db),
        state.config.warehouse.report_settings(),
    )
}

/// Locations with occupancy, mixed-SKU and merge flags
pub async fn get_optimizer_locations(
    State(state): State<AppState>,
    Query(filter): Query<OptimizerFilter>,
) -> AppResult<Json<Vec<OptimizerLocation>>> {
    let rows = reporting_service(state)
        .get_optimizer_locations(filter)
        .await?;
    Ok(Json(rows))
}

/// Distinct categories and brands for the filter dropdowns
pub async fn get_filter_options(State(state): State<AppState>) -> AppResult<Json<FilterOptions>> {
    let service = InventoryService::new(state.db);
    let options = service.fetch_filter_options().await?;
    Ok(Json(options))
}

/// Aisles the reports recognize
pub async fn get_aisles(State(state): State<AppState>) -> Json<AisleList> {
    Json(AisleList {
        aisles: reporting_service(state).aisles(),
    })
}

/// All product + rack-type rules
pub async fn list_rack_capacities(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RackCapacityRow>>> {
    let service = InventoryService::new(state.db);
    let rows = service.fetch_rack_overrides().await?;
    Ok(Json(rows))
}

/// Create or replace a product + rack-type rule
pub async fn set_rack_capacity(
    State(state): State<AppState>,
    Json(input): Json<SetRackCapacityInput>,
) -> AppResult<Json<RackCapacityRow>> {
    let service = CapacityService::new(state.db);
    let row = service.set_rack_override(input).await?;
    Ok(Json(row))
}

#[derive(Debug, Deserialize)]
pub struct CapacityLookupQuery {
    pub sku: Option<String>,
}

/// Show which rule decides the capacity of a location
pub async fn get_location_capacity_lookup(
    State(state): State<AppState>,
    Path(location_code): Path<String>,
    Query(query): Query<CapacityLookupQuery>,
) -> AppResult<Json<CapacityLookup>> {
    let sku = query
        .sku
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let lookup = reporting_service(state)
        .lookup_capacity(&location_code, sku)
        .await?;
    Ok(Json(lookup))
}
