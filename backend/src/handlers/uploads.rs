//! HTTP handlers for CSV uploads

use std::collections::HashMap;

use axum::{
    extract::{Multipart, State},
    Json,
};
use shared::UploadSummary;

use crate::error::{AppError, AppResult};
use crate::services::upload::UploadHistory;
use crate::services::UploadService;
use crate::AppState;

/// Read every file part of a multipart form, keyed by field name
pub(crate) async fn read_form_files(mut multipart: Multipart) -> AppResult<HashMap<String, Vec<u8>>> {
    let mut files = HashMap::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let bytes = field.bytes().await?;
        tracing::debug!(field = %name, bytes = bytes.len(), "Received form file");
        files.insert(name, bytes.to_vec());
    }

    Ok(files)
}

/// Remove a required file from the form
pub(crate) fn take_file(files: &mut HashMap<String, Vec<u8>>, name: &str) -> AppResult<Vec<u8>> {
    files
        .remove(name)
        .ok_or_else(|| AppError::Upload(format!("Missing form field '{name}'")))
}

/// Load the product master and location stock files
pub async fn upload_warehouse_data(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<UploadSummary>> {
    let mut files = read_form_files(multipart).await?;
    let products = take_file(&mut files, "products_file")?;
    let locations = take_file(&mut files, "location_file")?;

    let service = UploadService::new(state.db);
    let summary = service.import_warehouse_data(&products, &locations).await?;
    Ok(Json(summary))
}

/// Recent uploads
pub async fn get_upload_history(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UploadHistory>>> {
    let service = UploadService::new(state.db);
    let history = service.list_history().await?;
    Ok(Json(history))
}
