//! Purchase reorder analysis handler

use axum::{extract::Multipart, Json};
use shared::ReorderRecommendation;

use crate::error::AppResult;
use crate::handlers::uploads::{read_form_files, take_file};
use crate::services::purchase::PurchaseFiles;
use crate::services::PurchaseService;

/// Reorder recommendations from sales, stock and supplier files
pub async fn analyze_purchases(multipart: Multipart) -> AppResult<Json<Vec<ReorderRecommendation>>> {
    let mut files = read_form_files(multipart).await?;
    let files = PurchaseFiles {
        sales: take_file(&mut files, "sales_file")?,
        stock: take_file(&mut files, "stock_file")?,
        supplier: take_file(&mut files, "supplier_file")?,
    };

    let recommendations = PurchaseService::new().analyze(&files)?;
    Ok(Json(recommendations))
}
