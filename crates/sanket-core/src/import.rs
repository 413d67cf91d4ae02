//! Spreadsheet parsers for uploaded row sets
//!
//! Accepts XLSX (first sheet only) or CSV. Column headers use the upload
//! feed's names; unknown columns are ignored and missing columns tolerated.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::UploadedRow;

/// XLSX files are ZIP containers; sniff the magic rather than trusting a
/// filename extension that multipart uploads may not carry.
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4b, 0x03, 0x04];

/// Parse an uploaded spreadsheet, auto-detecting XLSX vs CSV.
pub fn parse_workbook(bytes: &[u8]) -> Result<Vec<UploadedRow>> {
    if bytes.starts_with(&ZIP_MAGIC) {
        parse_xlsx(bytes)
    } else {
        parse_csv(bytes)
    }
}

/// Map one header/cell pair onto an [`UploadedRow`] field. Headers not in
/// the feed's column set are dropped.
fn assign_field(row: &mut UploadedRow, header: &str, value: String) {
    let value = Some(value);
    match header {
        "BankAccountNumber" => row.bank_account_number = value,
        "ifscCode" => row.ifsc_code = value,
        "upiVpa" => row.upi_vpa = value,
        "acHolderName" => row.ac_holder_name = value,
        "WebsiteURL" => row.website_url = value,
        "UPIURLs" => row.upi_urls = value,
        "Method" => row.method = value,
        "npciUrl" => row.npci_url = value,
        "mfilteritUrl" => row.mfilterit_url = value,
        _ => {}
    }
}

/// Parse CSV bytes into uploaded rows.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<UploadedRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let mut row = UploadedRow::default();
        for (i, header) in headers.iter().enumerate() {
            if let Some(value) = record.get(i) {
                let value = value.trim();
                if !value.is_empty() {
                    assign_field(&mut row, header.trim(), value.to_string());
                }
            }
        }
        if !row.is_blank() {
            rows.push(row);
        }
    }

    debug!("Parsed {} CSV rows", rows.len());
    Ok(rows)
}

/// Parse the first sheet of an XLSX workbook into uploaded rows.
pub fn parse_xlsx(bytes: &[u8]) -> Result<Vec<UploadedRow>> {
    let mut workbook = Xlsx::new(Cursor::new(bytes.to_vec()))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .map(|name| name.to_string())
        .ok_or_else(|| Error::Import("workbook has no sheets".into()))?;
    let range = workbook.worksheet_range(&sheet)?;

    let mut row_iter = range.rows();
    let Some(header_cells) = row_iter.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_cells
        .iter()
        .map(|cell| cell_to_string(cell).unwrap_or_default())
        .collect();

    let mut rows = Vec::new();
    for cells in row_iter {
        let mut row = UploadedRow::default();
        for (header, cell) in headers.iter().zip(cells) {
            if let Some(value) = cell_to_string(cell) {
                assign_field(&mut row, header.trim(), value);
            }
        }
        if !row.is_blank() {
            rows.push(row);
        }
    }

    debug!("Parsed {} XLSX rows from sheet '{}'", rows.len(), sheet);
    Ok(rows)
}

/// Render a cell as a trimmed string; empty and error cells become `None`.
/// Integer-valued floats drop the fractional part, so account and phone
/// numbers survive the float round-trip Excel puts them through.
fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        Data::Float(f) => {
            if f.fract() == 0.0 {
                Some(format!("{:.0}", f))
            } else {
                Some(f.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Empty | Data::Error(_) => None,
    }
}
