//! Merge and preview handlers

use std::sync::Arc;

use axum::{
    extract::State,
    response::Html,
    Json,
};
use serde::Serialize;

use crate::{AppError, AppState};
use sanket_core::{render::render_table, CanonicalRow, Error};

/// Response for the merge endpoint
#[derive(Serialize)]
pub struct MergeResponse {
    pub merged: usize,
}

/// POST /api/merge - Recompute the merged row set
pub async fn run_merge(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MergeResponse>, AppError> {
    let mut session = state.session()?;
    match session.merge() {
        Ok(rows) => Ok(Json(MergeResponse { merged: rows.len() })),
        // Blocking preconditions surface as one user-facing message
        Err(e @ (Error::ReferenceNotLoaded | Error::NothingToMerge)) => {
            Err(AppError::bad_request(&e.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /api/preview - Current merged rows as an HTML table
pub async fn preview(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let session = state.session()?;
    Ok(Html(render_table(session.merged())))
}

/// GET /api/rows - Current merged rows as JSON
pub async fn list_rows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CanonicalRow>>, AppError> {
    let session = state.session()?;
    Ok(Json(session.merged().to_vec()))
}
