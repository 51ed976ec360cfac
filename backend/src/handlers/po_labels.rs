//! Purchase order label handler

use axum::{
    extract::{Multipart, State},
    Json,
};
use shared::LabelReport;

use crate::error::AppResult;
use crate::handlers::uploads::{read_form_files, take_file};
use crate::services::LabelService;
use crate::AppState;

/// Carton label counts for an uploaded purchase order
pub async fn generate_po_labels(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<LabelReport>> {
    let mut files = read_form_files(multipart).await?;
    let po = take_file(&mut files, "file")?;

    let service = LabelService::new(state.db);
    let report = service.generate_labels(&po).await?;
    Ok(Json(report))
}
