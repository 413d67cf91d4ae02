//! Reference-table diagnostics handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};

/// Response for the reference status endpoint
#[derive(Serialize)]
pub struct ReferenceStatus {
    pub loaded: bool,
    pub handles: usize,
    pub ifsc_prefixes: usize,
    pub origins: usize,
    pub categories: usize,
    pub uploaded_rows: usize,
    pub merged_rows: usize,
}

/// GET /api/reference - Lookup-table sizes and session counts
pub async fn reference_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReferenceStatus>, AppError> {
    let session = state.session()?;
    let refs = session.references();
    Ok(Json(ReferenceStatus {
        loaded: refs.is_loaded(),
        handles: refs.handle_to_bank.len(),
        ifsc_prefixes: refs.ifsc_to_bank.len(),
        origins: refs.website_to_origin.len(),
        categories: refs.website_to_category.len(),
        uploaded_rows: session.uploaded_count(),
        merged_rows: session.merged().len(),
    }))
}
