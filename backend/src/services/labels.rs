//! PO label generation

use std::collections::HashMap;

use shared::{build_label_line, parse_po_csv, LabelProduct, LabelReport};
use sqlx::{FromRow, PgPool};

use crate::error::AppResult;

/// Label service
#[derive(Clone)]
pub struct LabelService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct LabelProductRow {
    sku: String,
    product_name: String,
    units_per_carton: Option<i32>,
    carton_barcode: Option<String>,
}

impl From<LabelProductRow> for LabelProduct {
    fn from(row: LabelProductRow) -> Self {
        Self {
            sku: row.sku,
            product_name: row.product_name,
            units_per_carton: row.units_per_carton,
            carton_barcode: row.carton_barcode,
        }
    }
}

impl LabelService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Label counts for every line of an uploaded PO export
    pub async fn generate_labels(&self, csv: &[u8]) -> AppResult<LabelReport> {
        let lines = parse_po_csv(csv)?;

        let mut skus: Vec<String> = lines.iter().map(|l| l.sku.clone()).collect();
        skus.sort();
        skus.dedup();

        let products: HashMap<String, LabelProduct> = sqlx::query_as::<_, LabelProductRow>(
            r#"
            SELECT sku, product_name, units_per_carton, carton_barcode
            FROM products
            WHERE sku = ANY($1)
            "#,
        )
        .bind(&skus)
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .map(|row| (row.sku.clone(), LabelProduct::from(row)))
        .collect();

        let labels: Vec<_> = lines
            .iter()
            .map(|line| build_label_line(line, products.get(&line.sku)))
            .collect();

        let unmatched = labels.iter().filter(|l| l.needs_user_input).count();
        if unmatched > 0 {
            tracing::warn!(unmatched, "PO lines need manual SKU mapping");
        }

        Ok(LabelReport {
            total_rows: lines.len(),
            labels,
        })
    }
}
