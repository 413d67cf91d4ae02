//! Session state
//!
//! One `Session` owns everything a browser tab of the original tool kept in
//! module globals: the reference tables, the current upload, and the merged
//! output. A new upload replaces the previous one; merge recomputes the full
//! output set.

use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::import::parse_workbook;
use crate::lookup::ReferenceTables;
use crate::merge::merge_rows;
use crate::models::{CanonicalRow, UploadedRow};

#[derive(Debug, Default)]
pub struct Session {
    references: ReferenceTables,
    uploaded: Vec<UploadedRow>,
    merged: Vec<CanonicalRow>,
}

impl Session {
    pub fn new(references: ReferenceTables) -> Self {
        Self {
            references,
            uploaded: Vec::new(),
            merged: Vec::new(),
        }
    }

    /// Build a session from a reference-data directory. Missing or malformed
    /// reference files degrade to empty tables (merge will then be blocked).
    pub fn load_dir(dir: &Path) -> Self {
        Self::new(ReferenceTables::load_dir(dir))
    }

    /// Replace the current upload. Any previously merged output is dropped
    /// until the next merge. Returns the row count.
    pub fn set_upload(&mut self, rows: Vec<UploadedRow>) -> usize {
        let count = rows.len();
        self.uploaded = rows;
        self.merged.clear();
        info!("Upload replaced: {} rows", count);
        count
    }

    /// Parse spreadsheet bytes (XLSX or CSV) and replace the current upload.
    pub fn upload_workbook(&mut self, bytes: &[u8]) -> Result<usize> {
        let rows = parse_workbook(bytes)?;
        Ok(self.set_upload(rows))
    }

    /// Recompute the merged output from the current upload.
    ///
    /// Blocks with a single user-facing error when no reference data is
    /// loaded or nothing was uploaded; merging itself never fails per row.
    pub fn merge(&mut self) -> Result<&[CanonicalRow]> {
        if !self.references.is_loaded() {
            return Err(Error::ReferenceNotLoaded);
        }
        if self.uploaded.is_empty() {
            return Err(Error::NothingToMerge);
        }
        self.merged = merge_rows(&self.uploaded, &self.references);
        info!("Merged {} rows", self.merged.len());
        Ok(&self.merged)
    }

    pub fn references(&self) -> &ReferenceTables {
        &self.references
    }

    pub fn uploaded_count(&self) -> usize {
        self.uploaded.len()
    }

    /// The current merged output; empty until a merge has run.
    pub fn merged(&self) -> &[CanonicalRow] {
        &self.merged
    }
}
