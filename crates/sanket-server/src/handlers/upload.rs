//! Spreadsheet upload handler

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::{AppError, AppState, MAX_UPLOAD_SIZE};
use sanket_core::import::parse_workbook;

/// Response for the upload endpoint
#[derive(Serialize)]
pub struct UploadResponse {
    pub rows: usize,
    pub filename: Option<String>,
}

/// POST /api/upload - Replace the session's uploaded rows
///
/// Expects multipart form with:
/// - file: XLSX or CSV spreadsheet (required, max 10MB, first sheet only)
pub async fn upload_workbook(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;
    let mut total_size: usize = 0;

    // Extract fields from multipart form
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(&format!("Failed to read form field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "file" {
            filename = field.file_name().map(|s| s.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|_| AppError::bad_request("Failed to read file data"))?;
            total_size += bytes.len();

            // Check file size limit
            if total_size > MAX_UPLOAD_SIZE {
                return Err(AppError::bad_request(&format!(
                    "File too large. Maximum size is {} MB",
                    MAX_UPLOAD_SIZE / 1024 / 1024
                )));
            }

            file_data = Some(bytes.to_vec());
        }
    }

    let file_data = file_data.ok_or_else(|| AppError::bad_request("Missing file field"))?;

    let rows = parse_workbook(&file_data)
        .map_err(|e| AppError::bad_request(&format!("Failed to parse spreadsheet: {}", e)))?;

    let count = state.session()?.set_upload(rows);
    info!(
        rows = count,
        filename = filename.as_deref().unwrap_or("<unnamed>"),
        "Spreadsheet uploaded"
    );

    Ok(Json(UploadResponse {
        rows: count,
        filename,
    }))
}
