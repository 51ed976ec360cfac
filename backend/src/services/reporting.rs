//! Bin status and location optimizer reports
//!
//! Loads facts and overrides through [`InventoryService`] and hands them to
//! the pure builders in `shared`.

use serde::Serialize;
use shared::{
    build_bin_status_view, build_optimizer_view, BinStatusRow, CapacityBook, LocationCode,
    OptimizerFilter, OptimizerLocation, ReportSettings, ResolvedCapacity,
};

use crate::error::AppResult;
use crate::services::InventoryService;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    inventory: InventoryService,
    settings: ReportSettings,
}

/// How a location + SKU capacity was resolved
#[derive(Debug, Serialize)]
pub struct CapacityLookup {
    pub location_code: String,
    pub sku: Option<String>,
    pub rack_type: String,
    pub location_override: Option<i32>,
    pub rack_rule: Option<i32>,
    pub resolved: ResolvedCapacity,
    pub distinct_skus: i64,
}

impl ReportingService {
    pub fn new(inventory: InventoryService, settings: ReportSettings) -> Self {
        Self {
            inventory,
            settings,
        }
    }

    async fn load_capacity_book(&self) -> AppResult<CapacityBook> {
        let locations = self.inventory.fetch_location_overrides().await?;
        let rack_rules = self.inventory.fetch_rack_overrides().await?;
        Ok(CapacityBook::new(
            locations.into_iter().map(Into::into),
            rack_rules.into_iter().map(Into::into),
        ))
    }

    /// One row per location in a recognized aisle
    pub async fn get_bin_status(&self) -> AppResult<Vec<BinStatusRow>> {
        let facts = self.inventory.fetch_all_location_stock().await?;
        let book = self.load_capacity_book().await?;

        let rows = build_bin_status_view(&facts, &book, &self.settings);
        tracing::debug!(facts = facts.len(), locations = rows.len(), "Built bin status view");

        Ok(rows)
    }

    /// Optimizer rows for the filtered facts. Mixed-SKU detection always uses
    /// the unfiltered stock table.
    pub async fn get_optimizer_locations(
        &self,
        filter: OptimizerFilter,
    ) -> AppResult<Vec<OptimizerLocation>> {
        let filter = filter.normalized();
        let facts = self
            .inventory
            .fetch_location_stock_with_product(&filter)
            .await?;
        let sku_counts = self.inventory.fetch_distinct_sku_counts().await?;
        let book = self.load_capacity_book().await?;

        let rows = build_optimizer_view(&facts, &book, &sku_counts, &self.settings);
        tracing::debug!(
            ?filter,
            facts = facts.len(),
            locations = rows.len(),
            merge_candidates = rows.iter().filter(|r| r.needs_merge).count(),
            "Built optimizer view"
        );

        Ok(rows)
    }

    /// Explain the optimizer capacity for a location, optionally for a SKU.
    /// Without a SKU only the manual override and default are considered.
    pub async fn lookup_capacity(
        &self,
        location_code: &str,
        sku: Option<String>,
    ) -> AppResult<CapacityLookup> {
        let code = LocationCode::parse(location_code);
        let location_override = self.inventory.fetch_location_override(code.as_str()).await?;
        let rack_rule = match sku.as_deref() {
            Some(sku) if !code.rack_type().is_empty() => {
                self.inventory
                    .fetch_rack_override(sku, code.rack_type())
                    .await?
            }
            _ => None,
        };
        let distinct_skus = self.inventory.fetch_distinct_sku_count(code.as_str()).await?;

        let resolved = shared::resolve_capacity(
            location_override,
            rack_rule,
            self.settings.optimizer_default_max_cartons,
        );

        Ok(CapacityLookup {
            rack_type: code.rack_type().to_string(),
            location_code: code.as_str().to_string(),
            sku,
            location_override,
            rack_rule,
            resolved,
            distinct_skus,
        })
    }

    pub fn aisles(&self) -> Vec<String> {
        self.settings.aisles.letters()
    }
}
