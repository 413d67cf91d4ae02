//! Domain models for Sanket

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A row as read from the uploaded spreadsheet.
///
/// Every field is optional. Sheets in the wild omit columns freely, and the
/// merge falls back to template defaults for anything absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedRow {
    pub bank_account_number: Option<String>,
    pub ifsc_code: Option<String>,
    pub upi_vpa: Option<String>,
    pub ac_holder_name: Option<String>,
    pub website_url: Option<String>,
    /// Payment-gateway / UPI intent URL ("UPIURLs" column).
    pub upi_urls: Option<String>,
    pub method: Option<String>,
    pub npci_url: Option<String>,
    pub mfilterit_url: Option<String>,
}

impl UploadedRow {
    /// True when every field is absent (a blank sheet row).
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

/// Column order for export and preview. Matches the declaration order of
/// [`CanonicalRow`]; keep the two in sync.
pub const CANONICAL_COLUMNS: [&str; 19] = [
    "bank_account_number",
    "ifsc_code",
    "upi_vpa",
    "ac_holder_name",
    "website_url",
    "payment_gateway_intermediate_url",
    "payment_gateway_url",
    "upi_url",
    "transaction_method",
    "screenshot",
    "screenshot_case_report_link",
    "handle",
    "payment_gateway_name",
    "upi_bank_account_wallet",
    "inserted_date",
    "case_generated_time",
    "bank_name",
    "origin",
    "category_of_website",
];

/// The fully-populated output record. Every field is always present; absent
/// inputs degrade to the template default or a sentinel, never to a missing
/// field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRow {
    pub bank_account_number: String,
    pub ifsc_code: String,
    pub upi_vpa: String,
    pub ac_holder_name: String,
    pub website_url: String,
    pub payment_gateway_intermediate_url: String,
    pub payment_gateway_url: String,
    pub upi_url: String,
    pub transaction_method: String,
    pub screenshot: String,
    pub screenshot_case_report_link: String,
    pub handle: String,
    pub payment_gateway_name: String,
    pub upi_bank_account_wallet: String,
    pub inserted_date: String,
    pub case_generated_time: String,
    pub bank_name: String,
    pub origin: String,
    pub category_of_website: String,
}

impl CanonicalRow {
    /// Build a row from one JSON record, tolerating missing or non-string
    /// fields. Anything absent becomes the `"NA"` placeholder. Used for the
    /// template row of the reference data.
    pub fn from_json_record(record: &Value) -> Self {
        let field = |name: &str| {
            json_scalar_to_string(&record[name]).unwrap_or_else(|| "NA".to_string())
        };
        Self {
            bank_account_number: field("bank_account_number"),
            ifsc_code: field("ifsc_code"),
            upi_vpa: field("upi_vpa"),
            ac_holder_name: field("ac_holder_name"),
            website_url: field("website_url"),
            payment_gateway_intermediate_url: field("payment_gateway_intermediate_url"),
            payment_gateway_url: field("payment_gateway_url"),
            upi_url: field("upi_url"),
            transaction_method: field("transaction_method"),
            screenshot: field("screenshot"),
            screenshot_case_report_link: field("screenshot_case_report_link"),
            handle: field("handle"),
            payment_gateway_name: field("payment_gateway_name"),
            upi_bank_account_wallet: field("upi_bank_account_wallet"),
            inserted_date: field("inserted_date"),
            case_generated_time: field("case_generated_time"),
            bank_name: field("bank_name"),
            origin: field("origin"),
            category_of_website: field("category_of_website"),
        }
    }

    /// Field values in [`CANONICAL_COLUMNS`] order.
    pub fn values(&self) -> [&str; 19] {
        [
            &self.bank_account_number,
            &self.ifsc_code,
            &self.upi_vpa,
            &self.ac_holder_name,
            &self.website_url,
            &self.payment_gateway_intermediate_url,
            &self.payment_gateway_url,
            &self.upi_url,
            &self.transaction_method,
            &self.screenshot,
            &self.screenshot_case_report_link,
            &self.handle,
            &self.payment_gateway_name,
            &self.upi_bank_account_wallet,
            &self.inserted_date,
            &self.case_generated_time,
            &self.bank_name,
            &self.origin,
            &self.category_of_website,
        ]
    }
}

impl Default for CanonicalRow {
    /// All-placeholder row, used when no template document is available.
    fn default() -> Self {
        Self::from_json_record(&Value::Null)
    }
}

/// Instrument classification for a UPI/account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentType {
    Upi,
    Wallet,
    BankAccount,
}

impl InstrumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upi => "UPI",
            Self::Wallet => "Wallet",
            Self::BankAccount => "Bank Account",
        }
    }
}

impl std::str::FromStr for InstrumentType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "UPI" => Ok(Self::Upi),
            "Wallet" => Ok(Self::Wallet),
            "Bank Account" => Ok(Self::BankAccount),
            _ => Err(format!("Unknown instrument type: {}", s)),
        }
    }
}

impl std::fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Render a JSON scalar as a string. Integer-valued floats drop the
/// fractional part (spreadsheet-sourced account numbers arrive as floats).
/// Arrays, objects and null yield `None`.
pub(crate) fn json_scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 {
                    Some(format!("{:.0}", f))
                } else {
                    Some(f.to_string())
                }
            } else {
                Some(n.to_string())
            }
        }
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_from_partial_record() {
        let record = json!({
            "bank_account_number": "000000000000",
            "transaction_method": "UPI",
            "origin": "Unknown"
        });
        let row = CanonicalRow::from_json_record(&record);
        assert_eq!(row.bank_account_number, "000000000000");
        assert_eq!(row.transaction_method, "UPI");
        assert_eq!(row.origin, "Unknown");
        // Everything absent falls back to the placeholder
        assert_eq!(row.upi_vpa, "NA");
        assert_eq!(row.bank_name, "NA");
    }

    #[test]
    fn test_template_tolerates_numeric_fields() {
        let record = json!({ "bank_account_number": 12345678901_i64 });
        let row = CanonicalRow::from_json_record(&record);
        assert_eq!(row.bank_account_number, "12345678901");
    }

    #[test]
    fn test_default_row_is_all_placeholders() {
        let row = CanonicalRow::default();
        for value in row.values() {
            assert_eq!(value, "NA");
        }
    }

    #[test]
    fn test_values_follow_column_order() {
        let mut row = CanonicalRow::default();
        row.bank_account_number = "first".to_string();
        row.category_of_website = "last".to_string();
        let values = row.values();
        assert_eq!(values.len(), CANONICAL_COLUMNS.len());
        assert_eq!(values[0], "first");
        assert_eq!(values[18], "last");
    }

    #[test]
    fn test_instrument_type_round_trip() {
        for t in [
            InstrumentType::Upi,
            InstrumentType::Wallet,
            InstrumentType::BankAccount,
        ] {
            assert_eq!(t.as_str().parse::<InstrumentType>().unwrap(), t);
        }
    }
}
