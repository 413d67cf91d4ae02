//! Sanket Core Library
//!
//! Shared functionality for the Sanket payment-record enrichment tool:
//! - Reference-table loading (bank handles, IFSC prefixes, website labels)
//! - Field derivation (domain extraction, instrument classification,
//!   NPCI case-timestamp decoding)
//! - The row merger producing fully-populated canonical rows
//! - Spreadsheet import (XLSX/CSV) and export (CSV/JSON)
//! - HTML table preview rendering
//! - Session state owning tables, upload, and merged output

pub mod derive;
pub mod error;
pub mod export;
pub mod import;
pub mod lookup;
pub mod merge;
pub mod models;
pub mod render;
pub mod session;

pub use derive::{INVALID_TIMESTAMP, INVALID_URL};
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use lookup::ReferenceTables;
pub use models::{CanonicalRow, InstrumentType, UploadedRow, CANONICAL_COLUMNS};
pub use session::Session;
