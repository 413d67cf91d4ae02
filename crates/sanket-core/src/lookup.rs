//! Reference-table loading
//!
//! Builds the four lookup tables (UPI handle to bank, IFSC prefix to bank,
//! website to origin, website to category) and the canonical template row
//! from the static JSON reference documents. Loading is best-effort: a
//! missing or malformed document yields an empty table and every lookup
//! against it misses.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{json_scalar_to_string, CanonicalRow};

/// Reference file names, as shipped alongside the original datasets.
pub const HANDLE_BANK_FILE: &str = "handleBankName.json";
pub const IFSC_BANK_FILE: &str = "ifscBankName.json";
pub const ORIGIN_FILE: &str = "originWebsite.json";
pub const CATEGORY_FILE: &str = "categoryWebsite.json";
pub const TEMPLATE_FILE: &str = "secondFile.json";

/// Key normalization applied when building a lookup table. Lookups must
/// apply the same normalization to the derived key.
enum KeyNorm {
    Lower,
    Upper,
    Exact,
}

/// The four immutable lookup tables plus the template row, built once per
/// session.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    /// UPI handle (lower-cased) to bank name.
    pub handle_to_bank: HashMap<String, String>,
    /// IFSC 4-char prefix (upper-cased) to bank name.
    pub ifsc_to_bank: HashMap<String, String>,
    /// Website URL (exact) to origin label.
    pub website_to_origin: HashMap<String, String>,
    /// Website URL (exact) to category label.
    pub website_to_category: HashMap<String, String>,
    /// Template default row; all-placeholder when no template document was
    /// found.
    pub template: CanonicalRow,
    has_template: bool,
}

impl ReferenceTables {
    /// Build all tables from the five reference documents.
    ///
    /// Section and field names follow the reference datasets: the handle
    /// document keeps its records under `Sheet2`, the IFSC document under
    /// `Sheet3`, the website documents and the template under `Sheet1`.
    pub fn from_documents(
        handle_doc: &Value,
        ifsc_doc: &Value,
        origin_doc: &Value,
        category_doc: &Value,
        template_doc: &Value,
    ) -> Self {
        let handle_to_bank =
            build_lookup(handle_doc, "Sheet2", "Handle", "Bank_name", KeyNorm::Lower);
        // Both the table keys and the derived prefix are upper-cased; the
        // raw dataset mixes cases and exact matching would silently miss.
        let ifsc_to_bank =
            build_lookup(ifsc_doc, "Sheet3", "ifsc_code", "bank_name", KeyNorm::Upper);
        let website_to_origin = build_lookup(origin_doc, "Sheet1", "URL", "Origin", KeyNorm::Exact);
        let website_to_category =
            build_lookup(category_doc, "Sheet1", "URL", "Category", KeyNorm::Exact);

        let template_record = template_doc
            .get("Sheet1")
            .and_then(Value::as_array)
            .and_then(|records| records.first());
        let has_template = template_record.is_some();
        if !has_template && !template_doc.is_null() {
            warn!("template document has no Sheet1 records; using placeholder template");
        }
        let template = template_record
            .map(CanonicalRow::from_json_record)
            .unwrap_or_default();

        let tables = Self {
            handle_to_bank,
            ifsc_to_bank,
            website_to_origin,
            website_to_category,
            template,
            has_template,
        };
        debug!(
            handles = tables.handle_to_bank.len(),
            ifsc_prefixes = tables.ifsc_to_bank.len(),
            origins = tables.website_to_origin.len(),
            categories = tables.website_to_category.len(),
            has_template,
            "Built reference tables"
        );
        tables
    }

    /// Read the five reference documents from a directory. A missing or
    /// unparseable file behaves like a malformed document: its table stays
    /// empty and the failure is logged, not returned.
    pub fn load_dir(dir: &Path) -> Self {
        let read = |name: &str| -> Value {
            let path = dir.join(name);
            let text = match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    warn!("{}: {} (treating as empty)", path.display(), e);
                    return Value::Null;
                }
            };
            match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(e) => {
                    warn!("{}: invalid JSON ({}); treating as empty", path.display(), e);
                    Value::Null
                }
            }
        };

        Self::from_documents(
            &read(HANDLE_BANK_FILE),
            &read(IFSC_BANK_FILE),
            &read(ORIGIN_FILE),
            &read(CATEGORY_FILE),
            &read(TEMPLATE_FILE),
        )
    }

    /// Whether any reference data was loaded at all. Merging is blocked
    /// until this is true.
    pub fn is_loaded(&self) -> bool {
        self.has_template
            || !self.handle_to_bank.is_empty()
            || !self.ifsc_to_bank.is_empty()
            || !self.website_to_origin.is_empty()
            || !self.website_to_category.is_empty()
    }
}

/// Build one key/value table from a document section, skipping records
/// missing either field.
fn build_lookup(
    doc: &Value,
    section: &str,
    key_field: &str,
    value_field: &str,
    norm: KeyNorm,
) -> HashMap<String, String> {
    let Some(records) = doc.get(section).and_then(Value::as_array) else {
        if !doc.is_null() {
            warn!("reference document has no '{}' array; table will be empty", section);
        }
        return HashMap::new();
    };

    let mut table = HashMap::new();
    for record in records {
        let Some(key) = json_scalar_to_string(&record[key_field]).filter(|k| !k.is_empty())
        else {
            continue;
        };
        let Some(value) = json_scalar_to_string(&record[value_field]).filter(|v| !v.is_empty())
        else {
            continue;
        };
        let key = match norm {
            KeyNorm::Lower => key.to_lowercase(),
            KeyNorm::Upper => key.to_uppercase(),
            KeyNorm::Exact => key,
        };
        table.insert(key, value);
    }
    table
}
