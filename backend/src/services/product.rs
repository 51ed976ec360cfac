//! Product administration

use serde::{Deserialize, Serialize};
use shared::{normalize_sku, validate_max_cartons};
use sqlx::{FromRow, PgPool};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Product service
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Input for setting a product's pallet-level carton capacity
#[derive(Debug, Deserialize, Validate)]
pub struct PalletCapacityInput {
    #[validate(length(min = 1))]
    pub sku: String,
    pub pallet_carton_capacity: i32,
}

#[derive(Debug, Serialize, FromRow)]
pub struct PalletCapacity {
    pub sku: String,
    pub pallet_carton_capacity: Option<i32>,
}

impl ProductService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Update the pallet capacity of an existing product
    pub async fn update_pallet_capacity(&self, input: PalletCapacityInput) -> AppResult<PalletCapacity> {
        input.validate()?;
        validate_max_cartons(input.pallet_carton_capacity).map_err(|_| AppError::Validation {
            field: "pallet_carton_capacity".to_string(),
            message: "Invalid capacity".to_string(),
        })?;
        let sku = normalize_sku(&input.sku)?;

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, PalletCapacity>(
            r#"
            UPDATE products
            SET pallet_carton_capacity = $1
            WHERE sku = $2
            RETURNING sku, pallet_carton_capacity
            "#,
        )
        .bind(input.pallet_carton_capacity)
        .bind(&sku)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("SKU".to_string()))?;

        tx.commit().await?;

        tracing::info!(%sku, capacity = input.pallet_carton_capacity, "Pallet capacity updated");
        Ok(row)
    }
}
