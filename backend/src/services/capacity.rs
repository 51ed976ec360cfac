//! Administrative capacity overrides
//!
//! Each write validates first, then runs a single upsert in its own
//! transaction.

use serde::Deserialize;
use shared::{normalize_location_code, normalize_rack_type, normalize_sku, validate_max_cartons};
use sqlx::PgPool;
use validator::Validate;

use crate::error::AppResult;
use crate::services::inventory::{LocationCapacityRow, RackCapacityRow};

/// Capacity override service
#[derive(Clone)]
pub struct CapacityService {
    db: PgPool,
}

/// Input for a product + rack-type rule
#[derive(Debug, Deserialize, Validate)]
pub struct SetRackCapacityInput {
    #[validate(length(min = 1))]
    pub sku: String,
    #[validate(length(min = 1))]
    pub rack_type: String,
    pub max_cartons: i32,
}

/// Input for a manual location ceiling; `null` clears it
#[derive(Debug, Deserialize, Validate)]
pub struct SetLocationCapacityInput {
    #[validate(length(min = 1))]
    pub location_code: String,
    pub max_cartons: Option<i32>,
}

impl CapacityService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Insert or update the rule for (SKU, rack type)
    pub async fn set_rack_override(&self, input: SetRackCapacityInput) -> AppResult<RackCapacityRow> {
        input.validate()?;
        validate_max_cartons(input.max_cartons)?;
        let sku = normalize_sku(&input.sku)?;
        let rack_type = normalize_rack_type(&input.rack_type)?;

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, RackCapacityRow>(
            r#"
            INSERT INTO product_rack_capacity (sku, rack_type, max_cartons)
            VALUES ($1, $2, $3)
            ON CONFLICT (sku, rack_type)
            DO UPDATE SET max_cartons = EXCLUDED.max_cartons, updated_at = NOW()
            RETURNING sku, rack_type, max_cartons
            "#,
        )
        .bind(&sku)
        .bind(&rack_type)
        .bind(input.max_cartons)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(%sku, %rack_type, max_cartons = row.max_cartons, "Product rack capacity updated");
        Ok(row)
    }

    /// Insert or update the manual ceiling for a location
    pub async fn set_location_override(
        &self,
        input: SetLocationCapacityInput,
    ) -> AppResult<LocationCapacityRow> {
        input.validate()?;
        if let Some(max_cartons) = input.max_cartons {
            validate_max_cartons(max_cartons)?;
        }
        let code = normalize_location_code(&input.location_code)?;

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, LocationCapacityRow>(
            r#"
            INSERT INTO location_capacity (location_code, max_cartons)
            VALUES ($1, $2)
            ON CONFLICT (location_code)
            DO UPDATE SET max_cartons = EXCLUDED.max_cartons, updated_at = NOW()
            RETURNING location_code, max_cartons
            "#,
        )
        .bind(code.as_str())
        .bind(input.max_cartons)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(location_code = %code, max_cartons = ?row.max_cartons, "Location capacity saved");
        Ok(row)
    }
}
