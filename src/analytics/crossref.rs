//! Cross-border vendor matching. Exact string equality on uppercased
//! names only; transliteration and fuzzy matching are out of scope, which
//! is why every match carries a manual-verification note.

use std::collections::BTreeMap;

use crate::models::CanonicalRecord;

/// Annotation carried on every match row.
pub const MATCH_NOTE: &str = "Requires manual verification";

/// One vendor name (uppercased) seen in more than one country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossBorderMatch {
    pub vendor_name: String,
    /// Record count per country the name appears in.
    pub records_by_country: BTreeMap<String, usize>,
    pub note: &'static str,
}

impl CrossBorderMatch {
    pub fn country_count(&self, country: &str) -> usize {
        self.records_by_country.get(country).copied().unwrap_or(0)
    }
}

/// Find names present in two or more countries, ordered by name.
pub fn find_matches(records: &[CanonicalRecord]) -> Vec<CrossBorderMatch> {
    let mut counts: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for record in records {
        *counts
            .entry(record.vendor_name.to_uppercase())
            .or_default()
            .entry(record.country.clone())
            .or_insert(0) += 1;
    }

    counts
        .into_iter()
        .filter(|(_, by_country)| by_country.len() > 1)
        .map(|(vendor_name, records_by_country)| CrossBorderMatch {
            vendor_name,
            records_by_country,
            note: MATCH_NOTE,
        })
        .collect()
}
