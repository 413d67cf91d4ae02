//! Export writers for merged row sets
//!
//! One record per canonical row, always in [`CANONICAL_COLUMNS`] order.

use crate::error::{Error, Result};
use crate::models::{CanonicalRow, CANONICAL_COLUMNS};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// MIME type for download responses.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialize rows to CSV with a header record.
pub fn to_csv(rows: &[CanonicalRow]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CANONICAL_COLUMNS)?;
    for row in rows {
        wtr.write_record(row.values())?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| Error::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Export(e.to_string()))
}

/// Serialize rows to pretty-printed JSON.
pub fn to_json(rows: &[CanonicalRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Render rows in the requested format.
pub fn export(rows: &[CanonicalRow], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Csv => to_csv(rows),
        ExportFormat::Json => to_json(rows),
    }
}
