//! Analytics derived from the canonical dataset. Every component is a pure
//! function over `&[CanonicalRecord]`; nothing here mutates the dataset,
//! so the artifact writers and the console report see the same numbers.
//!
//! - [`risk`] — additive per-vendor risk scores.
//! - [`crossref`] — vendor names appearing in more than one country.
//! - [`transparency`] — field completeness and source coverage.
//! - [`patterns`] — aggregates over the exclusion records.
//! - [`contracts`] — value statistics over the contract awards.
//! - [`summary`] — whole-dataset roll-up.

pub mod contracts;
pub mod crossref;
pub mod patterns;
pub mod risk;
pub mod summary;
pub mod transparency;

use std::collections::BTreeMap;

use anyhow::Result;
use bigdecimal::{BigDecimal, RoundingMode};

use crate::config::Config;
use crate::models::{CanonicalRecord, VendorRiskProfile};

/// Group records by exact vendor name, case and whitespace as stored.
/// Ordered by name so every consumer iterates deterministically.
pub fn group_by_vendor(records: &[CanonicalRecord]) -> BTreeMap<&str, Vec<&CanonicalRecord>> {
    let mut groups: BTreeMap<&str, Vec<&CanonicalRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.vendor_name.as_str())
            .or_default()
            .push(record);
    }
    groups
}

/// Everything derived from one dataset, computed in a single pass over the
/// pipeline output.
pub struct AnalyticsBundle {
    pub summary: summary::DatasetSummary,
    pub patterns: patterns::ExclusionPatterns,
    pub contracts: contracts::ContractStats,
    pub cross_border: Vec<crossref::CrossBorderMatch>,
    pub risk_profiles: Vec<VendorRiskProfile>,
    pub transparency: transparency::TransparencyReport,
}

pub fn run_all(records: &[CanonicalRecord], config: &Config) -> Result<AnalyticsBundle> {
    Ok(AnalyticsBundle {
        summary: summary::summarize(records),
        patterns: patterns::analyze(records),
        contracts: contracts::analyze(records),
        cross_border: crossref::find_matches(records),
        risk_profiles: risk::score_vendors(records, &config.high_value_threshold()),
        transparency: transparency::assess(records, &config.metrics.completeness_fields)?,
    })
}

/// Insert thousands separators into a plain digit run, e.g. `1250000`
/// becomes `1,250,000`.
pub fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Round to whole units and group, e.g. `1250000.49` becomes `1,250,000`.
pub fn whole_grouped(value: &BigDecimal) -> String {
    let rounded = value.with_scale_round(0, RoundingMode::HalfEven).to_string();
    match rounded.strip_prefix('-') {
        Some(digits) => format!("-{}", group_digits(digits)),
        None => group_digits(&rounded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordType;

    #[test]
    fn test_group_by_vendor_is_exact_and_ordered() {
        let records = vec![
            test_support::record("Uzbekistan", RecordType::ContractAward, "acme"),
            test_support::record("United States", RecordType::Exclusion, "Acme"),
            test_support::record("United States", RecordType::Exclusion, "Acme"),
        ];

        let groups = group_by_vendor(&records);
        let names: Vec<&str> = groups.keys().copied().collect();
        // "Acme" and "acme" are distinct groups here
        assert_eq!(names, vec!["Acme", "acme"]);
        assert_eq!(groups["Acme"].len(), 2);
        assert_eq!(groups["acme"].len(), 1);
    }

    #[test]
    fn test_grouped_formatting() {
        use bigdecimal::BigDecimal;
        use std::str::FromStr;

        assert_eq!(group_digits("950"), "950");
        assert_eq!(group_digits("1234567"), "1,234,567");
        assert_eq!(whole_grouped(&BigDecimal::from_str("1250000.49").unwrap()), "1,250,000");
        assert_eq!(whole_grouped(&BigDecimal::from_str("1999999.5").unwrap()), "2,000,000");
        assert_eq!(whole_grouped(&BigDecimal::from(-1234567)), "-1,234,567");
    }
}
