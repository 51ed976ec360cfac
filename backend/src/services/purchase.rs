//! Purchase reorder analysis over uploaded CSV exports

use shared::{
    analyze_reorders, parse_sales_csv, parse_stock_csv, parse_supplier_csv, ReorderRecommendation,
    ReorderStatus,
};

use crate::error::AppResult;

/// The three files the analysis needs
pub struct PurchaseFiles {
    pub sales: Vec<u8>,
    pub stock: Vec<u8>,
    pub supplier: Vec<u8>,
}

/// Purchase analysis service; works purely on the uploaded files
#[derive(Clone, Default)]
pub struct PurchaseService;

impl PurchaseService {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, files: &PurchaseFiles) -> AppResult<Vec<ReorderRecommendation>> {
        let sales = parse_sales_csv(&files.sales)?;
        let stock = parse_stock_csv(&files.stock)?;
        let suppliers = parse_supplier_csv(&files.supplier)?;

        let recommendations = analyze_reorders(&sales, &stock, &suppliers)?;

        let urgent = recommendations
            .iter()
            .filter(|r| r.status == ReorderStatus::Urgent)
            .count();
        tracing::info!(
            skus = recommendations.len(),
            urgent,
            "Purchase analysis completed"
        );

        Ok(recommendations)
    }
}
