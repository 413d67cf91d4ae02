//! Row merger
//!
//! The heart of the tool: a pure mapping from one uploaded row plus the
//! reference tables to one fully-populated canonical row. Never fails;
//! malformed or missing inputs degrade to template defaults or sentinels.

use crate::derive::{
    classify_instrument, extract_domain, extract_timestamp_from_url, timestamp_to_date,
    timestamp_to_datetime,
};
use crate::lookup::ReferenceTables;
use crate::models::{CanonicalRow, UploadedRow};

/// Merge one uploaded row against the reference tables.
pub fn merge_row(row: &UploadedRow, refs: &ReferenceTables) -> CanonicalRow {
    let template = &refs.template;

    // Case-report links, comma-joined in mfilterit-then-npci order.
    let screenshot = [row.mfilterit_url.as_deref(), row.npci_url.as_deref()]
        .into_iter()
        .flatten()
        .filter(|u| !u.is_empty())
        .collect::<Vec<_>>()
        .join(",");

    let handle = match row.upi_vpa.as_deref() {
        Some(vpa) if vpa.contains('@') => vpa
            .split('@')
            .nth(1)
            .unwrap_or_default()
            .to_lowercase(),
        _ => "NA".to_string(),
    };

    // First four characters of the IFSC code identify the bank. The literal
    // "NA" marks an unknown code in the feeds, not a real prefix.
    let ifsc_prefix = row
        .ifsc_code
        .as_deref()
        .filter(|code| !code.is_empty() && *code != "NA")
        .map(|code| code.trim().chars().take(4).collect::<String>().to_uppercase());

    // IFSC wins over the handle when both resolve.
    let bank_name = ifsc_prefix
        .as_ref()
        .and_then(|prefix| refs.ifsc_to_bank.get(prefix))
        .or_else(|| refs.handle_to_bank.get(&handle))
        .cloned()
        .unwrap_or_else(|| "NA".to_string());

    let payment_gateway_name = row
        .upi_urls
        .as_deref()
        .filter(|u| !u.is_empty())
        .map(extract_domain)
        .unwrap_or_else(|| "NA".to_string());

    let instrument = classify_instrument(row.upi_vpa.as_deref().unwrap_or_default());

    let timestamp = row
        .npci_url
        .as_deref()
        .and_then(extract_timestamp_from_url);
    let inserted_date = timestamp_to_date(timestamp);
    // The datetime derivation has no sentinel of its own; the template keeps
    // the row fully populated.
    let case_generated_time =
        timestamp_to_datetime(timestamp).unwrap_or_else(|| template.case_generated_time.clone());

    // An absent website is "NA"; a website missing from the table falls back
    // to the template instead. The two cases are distinct on purpose.
    let origin = match row.website_url.as_deref().filter(|u| !u.is_empty()) {
        None => "NA".to_string(),
        Some(site) => refs
            .website_to_origin
            .get(site)
            .cloned()
            .unwrap_or_else(|| template.origin.clone()),
    };
    let category_of_website = match row.website_url.as_deref().filter(|u| !u.is_empty()) {
        None => "NA".to_string(),
        Some(site) => refs
            .website_to_category
            .get(site)
            .cloned()
            .unwrap_or_else(|| template.category_of_website.clone()),
    };

    let or_template = |value: &Option<String>, fallback: &String| -> String {
        value
            .as_deref()
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| fallback.clone())
    };

    CanonicalRow {
        bank_account_number: or_template(&row.bank_account_number, &template.bank_account_number),
        ifsc_code: or_template(&row.ifsc_code, &template.ifsc_code),
        upi_vpa: or_template(&row.upi_vpa, &template.upi_vpa),
        ac_holder_name: or_template(&row.ac_holder_name, &template.ac_holder_name),
        website_url: or_template(&row.website_url, &template.website_url),
        payment_gateway_intermediate_url: or_template(
            &row.upi_urls,
            &template.payment_gateway_intermediate_url,
        ),
        payment_gateway_url: or_template(&row.upi_urls, &template.payment_gateway_url),
        upi_url: or_template(&row.upi_urls, &template.upi_url),
        transaction_method: or_template(&row.method, &template.transaction_method),
        screenshot_case_report_link: screenshot.clone(),
        screenshot,
        handle,
        payment_gateway_name,
        upi_bank_account_wallet: instrument.as_str().to_string(),
        inserted_date,
        case_generated_time,
        bank_name,
        origin,
        category_of_website,
    }
}

/// Merge a full upload. Order is preserved.
pub fn merge_rows(rows: &[UploadedRow], refs: &ReferenceTables) -> Vec<CanonicalRow> {
    rows.iter().map(|row| merge_row(row, refs)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::{INVALID_TIMESTAMP, INVALID_URL};
    use serde_json::json;

    fn refs() -> ReferenceTables {
        ReferenceTables::from_documents(
            &json!({ "Sheet2": [
                { "Handle": "oksbi", "Bank_name": "State Bank of India" },
                { "Handle": "ybl", "Bank_name": "Yes Bank" },
            ]}),
            &json!({ "Sheet3": [
                { "ifsc_code": "HDFC", "bank_name": "HDFC Bank" },
                { "ifsc_code": "sbin", "bank_name": "State Bank of India" },
            ]}),
            &json!({ "Sheet1": [
                { "URL": "https://shop.example.com", "Origin": "Direct" },
            ]}),
            &json!({ "Sheet1": [
                { "URL": "https://shop.example.com", "Category": "E-commerce" },
            ]}),
            &json!({ "Sheet1": [
                {
                    "bank_account_number": "000000000000",
                    "transaction_method": "UPI",
                    "origin": "Referral",
                    "category_of_website": "Unclassified",
                    "case_generated_time": "1970-01-01 00:00:00"
                },
            ]}),
        )
    }

    fn full_row() -> UploadedRow {
        UploadedRow {
            bank_account_number: Some("12345678".to_string()),
            ifsc_code: Some("HDFC0001234".to_string()),
            upi_vpa: Some("merchant@OkSBI".to_string()),
            ac_holder_name: Some("A Merchant".to_string()),
            website_url: Some("https://shop.example.com".to_string()),
            upi_urls: Some("https://www.gateway.example.com/intent".to_string()),
            method: Some("Collect".to_string()),
            npci_url: Some("https://cases/npci-1700000000--123".to_string()),
            mfilterit_url: Some("https://mf/report/1".to_string()),
        }
    }

    #[test]
    fn test_ifsc_wins_over_handle() {
        // Row resolves via both the IFSC prefix (HDFC) and the handle (oksbi)
        let merged = merge_row(&full_row(), &refs());
        assert_eq!(merged.bank_name, "HDFC Bank");
    }

    #[test]
    fn test_handle_fallback_when_ifsc_misses() {
        let mut row = full_row();
        row.ifsc_code = Some("ICIC0001234".to_string());
        let merged = merge_row(&row, &refs());
        assert_eq!(merged.bank_name, "State Bank of India");
        assert_eq!(merged.handle, "oksbi");
    }

    #[test]
    fn test_ifsc_prefix_case_insensitive() {
        let mut row = full_row();
        row.ifsc_code = Some("sbin0001234".to_string());
        row.upi_vpa = None;
        let merged = merge_row(&row, &refs());
        assert_eq!(merged.bank_name, "State Bank of India");
    }

    #[test]
    fn test_literal_na_ifsc_skips_lookup() {
        let mut row = full_row();
        row.ifsc_code = Some("NA".to_string());
        row.upi_vpa = None;
        let merged = merge_row(&row, &refs());
        assert_eq!(merged.bank_name, "NA");
        // The pass-through field still carries the uploaded value
        assert_eq!(merged.ifsc_code, "NA");
    }

    #[test]
    fn test_screenshot_joins_case_urls() {
        let merged = merge_row(&full_row(), &refs());
        assert_eq!(
            merged.screenshot,
            "https://mf/report/1,https://cases/npci-1700000000--123"
        );
        assert_eq!(merged.screenshot, merged.screenshot_case_report_link);
    }

    #[test]
    fn test_screenshot_skips_absent_urls() {
        let mut row = full_row();
        row.mfilterit_url = None;
        let merged = merge_row(&row, &refs());
        assert_eq!(merged.screenshot, "https://cases/npci-1700000000--123");
    }

    #[test]
    fn test_derived_fields() {
        let merged = merge_row(&full_row(), &refs());
        assert_eq!(merged.handle, "oksbi");
        assert_eq!(merged.payment_gateway_name, "gateway.example.com");
        assert_eq!(merged.upi_bank_account_wallet, "UPI");
        assert_eq!(merged.inserted_date, "2023-11-15");
        assert_eq!(merged.case_generated_time, "2023-11-15 03:43:20");
        assert_eq!(merged.origin, "Direct");
        assert_eq!(merged.category_of_website, "E-commerce");
    }

    #[test]
    fn test_gateway_urls_fan_out() {
        let merged = merge_row(&full_row(), &refs());
        let url = "https://www.gateway.example.com/intent";
        assert_eq!(merged.payment_gateway_intermediate_url, url);
        assert_eq!(merged.payment_gateway_url, url);
        assert_eq!(merged.upi_url, url);
    }

    #[test]
    fn test_empty_row_degrades_to_template_and_sentinels() {
        let refs = refs();
        let merged = merge_row(&UploadedRow::default(), &refs);

        // Pass-through fields take the template defaults
        assert_eq!(merged.bank_account_number, "000000000000");
        assert_eq!(merged.transaction_method, "UPI");
        assert_eq!(merged.upi_vpa, "NA");

        // Derived fields take their sentinels
        assert_eq!(merged.screenshot, "");
        assert_eq!(merged.handle, "NA");
        assert_eq!(merged.bank_name, "NA");
        assert_eq!(merged.payment_gateway_name, "NA");
        assert_eq!(merged.upi_bank_account_wallet, "Bank Account");
        assert_eq!(merged.inserted_date, INVALID_TIMESTAMP);
        // The datetime fallback comes from the template, not a sentinel
        assert_eq!(merged.case_generated_time, "1970-01-01 00:00:00");
        // Absent website is "NA", not the template origin
        assert_eq!(merged.origin, "NA");
        assert_eq!(merged.category_of_website, "NA");
    }

    #[test]
    fn test_unknown_website_falls_back_to_template() {
        let mut row = full_row();
        row.website_url = Some("https://unknown.example.net".to_string());
        let merged = merge_row(&row, &refs());
        assert_eq!(merged.origin, "Referral");
        assert_eq!(merged.category_of_website, "Unclassified");
    }

    #[test]
    fn test_malformed_gateway_url_is_sentinel() {
        let mut row = full_row();
        row.upi_urls = Some("not a url".to_string());
        let merged = merge_row(&row, &refs());
        assert_eq!(merged.payment_gateway_name, INVALID_URL);
        // Pass-through still carries the raw value
        assert_eq!(merged.payment_gateway_url, "not a url");
    }

    #[test]
    fn test_wallet_classification() {
        let mut row = full_row();
        row.upi_vpa = Some("9876543210".to_string());
        let merged = merge_row(&row, &refs());
        assert_eq!(merged.upi_bank_account_wallet, "Wallet");
        assert_eq!(merged.handle, "NA");
    }

    #[test]
    fn test_merge_rows_preserves_order() {
        let refs = refs();
        let mut second = full_row();
        second.ac_holder_name = Some("B Merchant".to_string());
        let merged = merge_rows(&[full_row(), second], &refs);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].ac_holder_name, "A Merchant");
        assert_eq!(merged[1].ac_holder_name, "B Merchant");
    }
}
