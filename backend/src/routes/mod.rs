//! Route definitions for the Warehouse Inventory Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/bins", get(handlers::get_bin_status))
        .nest("/optimizer", optimizer_routes())
        .nest("/locations", location_routes())
        .route("/products/pallet-capacity", post(handlers::set_pallet_capacity))
        .nest("/upload", upload_routes())
        .route("/po/labels", post(handlers::generate_po_labels))
        .route("/purchase/analyze", post(handlers::analyze_purchases))
}

/// Location optimizer routes
fn optimizer_routes() -> Router<AppState> {
    Router::new()
        .route("/locations", get(handlers::get_optimizer_locations))
        .route("/filters", get(handlers::get_filter_options))
        .route("/aisles", get(handlers::get_aisles))
        .route("/product-rack-capacity", get(handlers::list_rack_capacities))
        .route("/set-product-rack-capacity", post(handlers::set_rack_capacity))
        .route(
            "/capacity/:location_code",
            get(handlers::get_location_capacity_lookup),
        )
}

/// Manual location ceiling routes
fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/capacity", get(handlers::list_location_capacities))
        .route("/pallet-capacity", post(handlers::set_location_capacity))
}

/// CSV upload routes
fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/warehouse-data", post(handlers::upload_warehouse_data))
        .route("/history", get(handlers::get_upload_history))
}
