//! Integration tests for sanket-core
//!
//! These tests exercise the full reference-load → upload → merge → export
//! workflow.

use sanket_core::{
    export::{to_csv, to_json},
    lookup::{
        ReferenceTables, CATEGORY_FILE, HANDLE_BANK_FILE, IFSC_BANK_FILE, ORIGIN_FILE,
        TEMPLATE_FILE,
    },
    render::render_table,
    Error, Session, CANONICAL_COLUMNS,
};

/// Uploaded sheet with three rows:
/// - a UPI row resolving its bank via the IFSC prefix
/// - a wallet row resolving nothing
/// - a row with only a website, hitting the origin/category tables
fn upload_csv() -> &'static str {
    "BankAccountNumber,ifscCode,upiVpa,acHolderName,WebsiteURL,UPIURLs,Method,npciUrl,mfilteritUrl\n\
     50100123456789,HDFC0000123,merchant@okhdfcbank,First Merchant,https://shop.example.com,https://www.gw.example.com/pay,Collect,https://cases/npci-1700000000--77,https://mf/77\n\
     ,,9876543210,Second Merchant,,,,,\n\
     ,,,Third Merchant,https://other.example.org,,,,\n"
}

fn write_reference_dir(dir: &std::path::Path) {
    std::fs::write(
        dir.join(HANDLE_BANK_FILE),
        r#"{ "Sheet2": [
            { "Handle": "okhdfcbank", "Bank_name": "HDFC Bank" },
            { "Handle": "ybl", "Bank_name": "Yes Bank" }
        ]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join(IFSC_BANK_FILE),
        r#"{ "Sheet3": [
            { "ifsc_code": "HDFC", "bank_name": "HDFC Bank Ltd" },
            { "ifsc_code": "sbin", "bank_name": "State Bank of India" }
        ]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join(ORIGIN_FILE),
        r#"{ "Sheet1": [
            { "URL": "https://shop.example.com", "Origin": "Direct" }
        ]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join(CATEGORY_FILE),
        r#"{ "Sheet1": [
            { "URL": "https://shop.example.com", "Category": "E-commerce" }
        ]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join(TEMPLATE_FILE),
        r#"{ "Sheet1": [
            {
                "bank_account_number": "000000000000",
                "transaction_method": "UPI",
                "origin": "Unknown",
                "category_of_website": "Unclassified"
            }
        ]}"#,
    )
    .unwrap();
}

#[test]
fn test_full_enrichment_workflow() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_reference_dir(dir.path());

    let mut session = Session::load_dir(dir.path());
    assert!(session.references().is_loaded());

    let count = session
        .upload_workbook(upload_csv().as_bytes())
        .expect("Failed to parse upload");
    assert_eq!(count, 3);

    let rows = session.merge().expect("Merge failed").to_vec();
    assert_eq!(rows.len(), 3);

    // Row 1: IFSC prefix beats the handle table
    assert_eq!(rows[0].bank_name, "HDFC Bank Ltd");
    assert_eq!(rows[0].handle, "okhdfcbank");
    assert_eq!(rows[0].payment_gateway_name, "gw.example.com");
    assert_eq!(rows[0].upi_bank_account_wallet, "UPI");
    assert_eq!(rows[0].inserted_date, "2023-11-15");
    assert_eq!(rows[0].case_generated_time, "2023-11-15 03:43:20");
    assert_eq!(rows[0].origin, "Direct");
    assert_eq!(rows[0].category_of_website, "E-commerce");
    assert_eq!(rows[0].screenshot, "https://mf/77,https://cases/npci-1700000000--77");

    // Row 2: wallet number, everything else degrades
    assert_eq!(rows[1].upi_bank_account_wallet, "Wallet");
    assert_eq!(rows[1].bank_name, "NA");
    assert_eq!(rows[1].handle, "NA");
    assert_eq!(rows[1].origin, "NA");
    assert_eq!(rows[1].bank_account_number, "000000000000");
    assert_eq!(rows[1].inserted_date, sanket_core::INVALID_TIMESTAMP);

    // Row 3: website present but unknown falls back to the template labels
    assert_eq!(rows[2].origin, "Unknown");
    assert_eq!(rows[2].category_of_website, "Unclassified");

    // Merge is idempotent
    let again = session.merge().expect("Second merge failed").to_vec();
    assert_eq!(rows, again);
}

#[test]
fn test_workflow_exports() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_reference_dir(dir.path());

    let mut session = Session::load_dir(dir.path());
    session.upload_workbook(upload_csv().as_bytes()).unwrap();
    session.merge().unwrap();

    let csv = to_csv(session.merged()).expect("CSV export failed");
    let mut lines = csv.lines();
    assert_eq!(lines.next().unwrap(), CANONICAL_COLUMNS.join(","));
    assert_eq!(lines.count(), 3);
    assert!(csv.contains("HDFC Bank Ltd"));

    let json = to_json(session.merged()).expect("JSON export failed");
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 3);
    assert_eq!(parsed[0]["bank_name"], "HDFC Bank Ltd");

    let html = render_table(session.merged());
    assert_eq!(html.matches("<td>").count(), 3 * CANONICAL_COLUMNS.len());
}

#[test]
fn test_merge_blocked_without_reference_data() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    // No reference files at all
    let mut session = Session::load_dir(dir.path());
    session.upload_workbook(upload_csv().as_bytes()).unwrap();
    assert!(matches!(session.merge(), Err(Error::ReferenceNotLoaded)));
}

#[test]
fn test_reupload_replaces_previous_session_rows() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_reference_dir(dir.path());

    let mut session = Session::load_dir(dir.path());
    session.upload_workbook(upload_csv().as_bytes()).unwrap();
    session.merge().unwrap();
    assert_eq!(session.merged().len(), 3);

    let smaller = "upiVpa\nonly@ybl\n";
    session.upload_workbook(smaller.as_bytes()).unwrap();
    assert!(session.merged().is_empty());
    let rows = session.merge().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].bank_name, "Yes Bank");
}
