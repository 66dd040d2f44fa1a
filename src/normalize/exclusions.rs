//! Normalizer for the US SAM exclusions public extract. The extract has a
//! fixed schema, so columns are addressed by name rather than resolved.

use crate::models::{CanonicalRecord, RecordType};
use crate::normalize::coerce::{non_empty, parse_date};
use crate::table::{Row, SourceTable};

pub const COUNTRY: &str = "United States";
pub const RECORD_SOURCE: &str = "SAM Exclusions Public Extract (GSA)";
pub const SOURCE_URL: &str = "https://open.gsa.gov/api/sam/";

/// Map every extract row onto the canonical schema. Rows without a usable
/// vendor name are dropped.
pub fn normalize(table: &SourceTable) -> Vec<CanonicalRecord> {
    table.rows().filter_map(normalize_row).collect()
}

fn normalize_row(row: Row<'_>) -> Option<CanonicalRecord> {
    let vendor_name = vendor_name(row)?;
    let record_date =
        parse_date(row.named("Active Date")).or_else(|| parse_date(row.named("Creation_Date")));

    Some(CanonicalRecord {
        country: COUNTRY.to_string(),
        record_type: RecordType::Exclusion,
        record_source: RECORD_SOURCE.to_string(),
        vendor_name,
        government_identifier: non_empty(row.named("DUNS")),
        record_id: non_empty(row.named("SAM Number")),
        record_date,
        value: None,
        currency: None,
        notes: notes(row),
        source_url: SOURCE_URL.to_string(),
    })
}

/// The `Name` column wins when present; otherwise the personal-name parts
/// are joined with single spaces, skipping empty ones.
fn vendor_name(row: Row<'_>) -> Option<String> {
    if let Some(name) = non_empty(row.named("Name")) {
        return Some(name);
    }
    let parts: Vec<&str> = ["Prefix", "First", "Middle", "Last", "Suffix"]
        .into_iter()
        .map(|column| row.named(column).trim())
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// `Excluding Agency | Exclusion Program | Exclusion Type`, with separator
/// artifacts left by empty edge components stripped off.
fn notes(row: Row<'_>) -> Option<String> {
    let joined = [
        row.named("Excluding Agency").trim(),
        row.named("Exclusion Program").trim(),
        row.named("Exclusion Type").trim(),
    ]
    .join(" | ");
    non_empty(joined.trim_matches(|c| c == ' ' || c == '|'))
}
