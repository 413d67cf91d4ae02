//! Export download handler

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, Response, StatusCode},
};
use serde::Deserialize;
use tracing::info;

use crate::{AppError, AppState};
use sanket_core::{export, ExportFormat};

/// Query parameters for the export endpoint
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// Output format (default: csv)
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "csv".to_string()
}

/// GET /api/export - Download the merged rows as CSV or JSON
pub async fn export_rows(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportQuery>,
) -> Result<Response<Body>, AppError> {
    let format: ExportFormat = params
        .format
        .parse()
        .map_err(|_| AppError::bad_request("Invalid format. Use 'csv' or 'json'"))?;

    let payload = {
        let session = state.session()?;
        export::export(session.merged(), format)
            .map_err(|e| AppError::internal(&e.to_string()))?
    };
    info!("Exported merged rows as {}", format);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, format.content_type())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"enriched.{}\"", format),
        )
        .body(Body::from(payload))
        .map_err(|e| AppError::internal(&e.to_string()))
}
