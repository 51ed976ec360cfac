//! Warehouse CSV import

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{parse_location_csv, parse_product_csv, UploadSummary};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppResult;

/// Number of uploads returned by the history endpoint
const HISTORY_LIMIT: i64 = 20;

/// Upload service
#[derive(Clone)]
pub struct UploadService {
    db: PgPool,
}

/// A completed upload
#[derive(Debug, Serialize, FromRow)]
pub struct UploadHistory {
    pub id: Uuid,
    pub product_rows: i32,
    pub location_rows: i32,
    pub upload_time: DateTime<Utc>,
}

impl UploadService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Parse both files, then upsert products, stock and the history row in
    /// one transaction
    pub async fn import_warehouse_data(
        &self,
        products_csv: &[u8],
        location_csv: &[u8],
    ) -> AppResult<UploadSummary> {
        let products = parse_product_csv(products_csv)?;
        let locations = parse_location_csv(location_csv)?;

        if locations.skipped > 0 {
            tracing::warn!(skipped = locations.skipped, "Skipped unusable location rows");
        }

        let mut tx = self.db.begin().await?;

        for product in &products {
            sqlx::query(
                r#"
                INSERT INTO products (
                    sku, product_name, category, brand, units_per_carton,
                    unit_barcode, carton_barcode, outer_barcode
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT (sku) DO UPDATE SET
                    product_name = EXCLUDED.product_name,
                    category = EXCLUDED.category,
                    brand = COALESCE(EXCLUDED.brand, products.brand),
                    units_per_carton = EXCLUDED.units_per_carton,
                    unit_barcode = EXCLUDED.unit_barcode,
                    carton_barcode = EXCLUDED.carton_barcode,
                    outer_barcode = EXCLUDED.outer_barcode
                "#,
            )
            .bind(&product.sku)
            .bind(&product.product_name)
            .bind(&product.category)
            .bind(&product.brand)
            .bind(product.units_per_carton)
            .bind(&product.unit_barcode)
            .bind(&product.carton_barcode)
            .bind(&product.outer_barcode)
            .execute(&mut *tx)
            .await?;
        }

        for stock in &locations.rows {
            sqlx::query(
                r#"
                INSERT INTO location_stock (location_code, sku, units)
                VALUES ($1, $2, $3)
                ON CONFLICT (location_code, sku)
                DO UPDATE SET units = EXCLUDED.units, updated_at = NOW()
                "#,
            )
            .bind(&stock.location_code)
            .bind(&stock.sku)
            .bind(stock.units.max(0))
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO upload_history (product_rows, location_rows, upload_time)
            VALUES ($1, $2, NOW())
            "#,
        )
        .bind(i32::try_from(products.len()).unwrap_or(i32::MAX))
        .bind(i32::try_from(locations.rows.len()).unwrap_or(i32::MAX))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            products = products.len(),
            locations = locations.rows.len(),
            "Warehouse data uploaded"
        );

        Ok(UploadSummary {
            status: "success".to_string(),
            products_loaded: products.len(),
            locations_loaded: locations.rows.len(),
        })
    }

    /// Most recent uploads, newest first
    pub async fn list_history(&self) -> AppResult<Vec<UploadHistory>> {
        let rows = sqlx::query_as::<_, UploadHistory>(
            r#"
            SELECT id, product_rows, location_rows, upload_time
            FROM upload_history
            ORDER BY upload_time DESC
            LIMIT $1
            "#,
        )
        .bind(HISTORY_LIMIT)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }
}
