//! Read-only access to stock facts and capacity overrides
//!
//! These queries only fetch rows. Carton math, capacity precedence and
//! classification happen in the `shared` crate.

use std::collections::HashMap;

use serde::Serialize;
use shared::{FilterOptions, LocationCapacity, OptimizerFilter, ProductRackCapacity, StockFact};
use sqlx::{FromRow, PgPool};

use crate::error::AppResult;

/// Stock fact source backed by PostgreSQL
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// Row for the stock + product join
#[derive(Debug, FromRow)]
struct StockFactRow {
    location_code: String,
    sku: String,
    product_name: String,
    brand: Option<String>,
    category: Option<String>,
    units: i64,
    units_per_carton: Option<i32>,
}

impl From<StockFactRow> for StockFact {
    fn from(row: StockFactRow) -> Self {
        Self {
            location_code: row.location_code,
            sku: row.sku,
            product_name: row.product_name,
            brand: row.brand,
            category: row.category,
            units: row.units,
            units_per_carton: row.units_per_carton,
        }
    }
}

/// Manual location override row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LocationCapacityRow {
    pub location_code: String,
    pub max_cartons: Option<i32>,
}

impl From<LocationCapacityRow> for LocationCapacity {
    fn from(row: LocationCapacityRow) -> Self {
        Self {
            location_code: row.location_code,
            max_cartons: row.max_cartons,
        }
    }
}

/// Product + rack-type rule row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RackCapacityRow {
    pub sku: String,
    pub rack_type: String,
    pub max_cartons: i32,
}

impl From<RackCapacityRow> for ProductRackCapacity {
    fn from(row: RackCapacityRow) -> Self {
        Self {
            sku: row.sku,
            rack_type: row.rack_type,
            max_cartons: row.max_cartons,
        }
    }
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Stock facts joined with product data, narrowed by the optional
    /// filters. Ordered by location then SKU.
    pub async fn fetch_location_stock_with_product(
        &self,
        filter: &OptimizerFilter,
    ) -> AppResult<Vec<StockFact>> {
        let rows = sqlx::query_as::<_, StockFactRow>(
            r#"
            SELECT ls.location_code, ls.sku, p.product_name, p.brand, p.category,
                   ls.units::BIGINT AS units, p.units_per_carton
            FROM location_stock ls
            JOIN products p ON p.sku = ls.sku
            WHERE ($1::TEXT IS NULL OR LEFT(split_part(UPPER(ls.location_code), '-', 1), 1) = $1)
              AND ($2::TEXT IS NULL OR p.category ILIKE $2)
              AND ($3::TEXT IS NULL OR p.brand ILIKE $3)
              AND ($4::TEXT IS NULL OR ls.sku ILIKE $4 OR p.product_name ILIKE $4)
            ORDER BY UPPER(ls.location_code), ls.sku
            "#,
        )
        .bind(&filter.aisle)
        .bind(OptimizerFilter::like_pattern(&filter.category))
        .bind(OptimizerFilter::like_pattern(&filter.brand))
        .bind(OptimizerFilter::like_pattern(&filter.search))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(StockFact::from).collect())
    }

    /// Every stock fact, unfiltered
    pub async fn fetch_all_location_stock(&self) -> AppResult<Vec<StockFact>> {
        self.fetch_location_stock_with_product(&OptimizerFilter::default())
            .await
    }

    /// Manual override for one location, if a ceiling is set
    pub async fn fetch_location_override(&self, location_code: &str) -> AppResult<Option<i32>> {
        let max_cartons = sqlx::query_scalar::<_, Option<i32>>(
            "SELECT max_cartons FROM location_capacity WHERE UPPER(location_code) = UPPER($1)",
        )
        .bind(location_code)
        .fetch_optional(&self.db)
        .await?;

        Ok(max_cartons.flatten())
    }

    /// All manual location overrides
    pub async fn fetch_location_overrides(&self) -> AppResult<Vec<LocationCapacityRow>> {
        let rows = sqlx::query_as::<_, LocationCapacityRow>(
            r#"
            SELECT location_code, max_cartons
            FROM location_capacity
            ORDER BY UPPER(location_code)
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Rule for a SKU on a rack type
    pub async fn fetch_rack_override(&self, sku: &str, rack_type: &str) -> AppResult<Option<i32>> {
        let max_cartons = sqlx::query_scalar::<_, i32>(
            "SELECT max_cartons FROM product_rack_capacity WHERE sku = $1 AND rack_type = UPPER($2)",
        )
        .bind(sku)
        .bind(rack_type)
        .fetch_optional(&self.db)
        .await?;

        Ok(max_cartons)
    }

    /// All product + rack-type rules
    pub async fn fetch_rack_overrides(&self) -> AppResult<Vec<RackCapacityRow>> {
        let rows = sqlx::query_as::<_, RackCapacityRow>(
            r#"
            SELECT sku, rack_type, max_cartons
            FROM product_rack_capacity
            ORDER BY sku, rack_type
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Distinct SKUs stored at one location across the whole stock table
    pub async fn fetch_distinct_sku_count(&self, location_code: &str) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT sku) FROM location_stock WHERE UPPER(location_code) = UPPER($1)",
        )
        .bind(location_code)
        .fetch_one(&self.db)
        .await?;

        Ok(count)
    }

    /// Distinct SKU count for every location, keyed by upper-cased code
    pub async fn fetch_distinct_sku_counts(&self) -> AppResult<HashMap<String, i64>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT UPPER(location_code), COUNT(DISTINCT sku)
            FROM location_stock
            GROUP BY UPPER(location_code)
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// Distinct categories and brands for the optimizer filters
    pub async fn fetch_filter_options(&self) -> AppResult<FilterOptions> {
        let categories = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT category FROM products WHERE category IS NOT NULL ORDER BY category",
        )
        .fetch_all(&self.db)
        .await?;

        let brands = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT brand FROM products WHERE brand IS NOT NULL ORDER BY brand",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(FilterOptions { categories, brands })
    }
}
