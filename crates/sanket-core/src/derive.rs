//! Field derivation functions
//!
//! Pure helpers shared by the row merger: payment-gateway domain extraction,
//! instrument classification, and NPCI case-timestamp decoding. None of these
//! return errors; malformed input degrades to a sentinel value.

use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use url::Url;

use crate::models::InstrumentType;

/// Sentinel returned by [`extract_domain`] for unparseable URLs.
pub const INVALID_URL: &str = "Invalid URL";

/// Sentinel returned by [`timestamp_to_date`] for absent timestamps.
pub const INVALID_TIMESTAMP: &str = "Invalid Timestamp";

/// NPCI case timestamps are rendered in IST (+05:30).
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

fn npci_case_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"npci-([0-9]+)--").expect("valid literal pattern"))
}

fn wallet_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("valid literal pattern"))
}

/// Extract the hostname from a URL, stripping a leading `www.`.
///
/// Returns [`INVALID_URL`] when the input is not a syntactically valid
/// absolute URL. A valid URL without a host (e.g. `mailto:`) yields an empty
/// string.
pub fn extract_domain(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or("");
            host.strip_prefix("www.").unwrap_or(host).to_string()
        }
        Err(_) => INVALID_URL.to_string(),
    }
}

/// Classify a UPI/account identifier.
///
/// Order matters: blank first, then `@`-containment (UPI VPA), then a bare
/// 10-digit number (wallet / phone), else a bank account.
pub fn classify_instrument(identifier: &str) -> InstrumentType {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return InstrumentType::BankAccount;
    }
    if identifier.contains('@') {
        return InstrumentType::Upi;
    }
    if wallet_number_re().is_match(identifier) {
        return InstrumentType::Wallet;
    }
    InstrumentType::BankAccount
}

/// Pull the epoch-seconds timestamp out of an NPCI case URL.
///
/// The URL embeds it as `npci-<digits>--`. Returns `None` when the pattern is
/// absent or the digit run does not fit an `i64`.
pub fn extract_timestamp_from_url(url: &str) -> Option<i64> {
    let caps = npci_case_re().captures(url)?;
    caps[1].parse().ok()
}

/// Render epoch seconds as an IST `YYYY-MM-DD` date.
///
/// Returns [`INVALID_TIMESTAMP`] for an absent, zero, or unrepresentable
/// timestamp.
pub fn timestamp_to_date(timestamp: Option<i64>) -> String {
    match ist_datetime(timestamp) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => INVALID_TIMESTAMP.to_string(),
    }
}

/// Render epoch seconds as an IST `YYYY-MM-DD HH:MM:SS` datetime.
///
/// Unlike [`timestamp_to_date`] this returns `None` for an absent timestamp
/// instead of a sentinel; the merger decides the fallback. The asymmetry is
/// deliberate (see DESIGN.md).
pub fn timestamp_to_datetime(timestamp: Option<i64>) -> Option<String> {
    ist_datetime(timestamp).map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

fn ist_datetime(timestamp: Option<i64>) -> Option<DateTime<FixedOffset>> {
    // Zero is treated as absent, matching the upstream feed where missing
    // case timestamps surface as 0.
    let secs = timestamp.filter(|&t| t != 0)?;
    let utc = DateTime::from_timestamp(secs, 0)?;
    let offset = FixedOffset::east_opt(IST_OFFSET_SECS)?;
    Some(utc.with_timezone(&offset))
}
