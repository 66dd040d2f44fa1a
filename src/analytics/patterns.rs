//! Aggregates over the exclusion records: which agencies exclude, under
//! which programs, what kinds of exclusions, and the yearly trend.

use std::collections::{BTreeMap, HashSet};

use chrono::Datelike;

use crate::models::{CanonicalRecord, RecordType};

const TOP_N: usize = 10;

/// Ranked views over the exclusion records.
#[derive(Debug, Clone, Default)]
pub struct ExclusionPatterns {
    pub total_exclusions: usize,
    pub unique_excluded_vendors: usize,
    /// Top excluding agencies, count descending.
    pub top_agencies: Vec<(String, usize)>,
    /// Top exclusion programs, count descending.
    pub top_programs: Vec<(String, usize)>,
    /// All exclusion types, count descending.
    pub exclusion_types: Vec<(String, usize)>,
    /// Exclusions per year, ascending by year.
    pub records_by_year: Vec<(i32, usize)>,
}

/// Summarize the exclusion records. Agency, program and type are recovered
/// from the `notes` field, which the normalizer writes as
/// `agency | program | type`; records missing a component are skipped for
/// that ranking only, and dateless records are skipped in the yearly trend.
pub fn analyze(records: &[CanonicalRecord]) -> ExclusionPatterns {
    let exclusions: Vec<&CanonicalRecord> = records
        .iter()
        .filter(|r| r.record_type == RecordType::Exclusion)
        .collect();

    let mut agencies: BTreeMap<String, usize> = BTreeMap::new();
    let mut programs: BTreeMap<String, usize> = BTreeMap::new();
    let mut types: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();

    for record in &exclusions {
        let mut components = record.notes.as_deref().unwrap_or("").split(" | ");
        bump(&mut agencies, components.next());
        bump(&mut programs, components.next());
        bump(&mut types, components.next());
        if let Some(date) = record.record_date {
            *by_year.entry(date.year()).or_insert(0) += 1;
        }
    }

    let unique: HashSet<&str> = exclusions.iter().map(|r| r.vendor_name.as_str()).collect();

    ExclusionPatterns {
        total_exclusions: exclusions.len(),
        unique_excluded_vendors: unique.len(),
        top_agencies: ranked(agencies, TOP_N),
        top_programs: ranked(programs, TOP_N),
        exclusion_types: ranked(types, usize::MAX),
        records_by_year: by_year.into_iter().collect(),
    }
}

fn bump(counts: &mut BTreeMap<String, usize>, component: Option<&str>) {
    if let Some(component) = component.map(str::trim).filter(|c| !c.is_empty()) {
        *counts.entry(component.to_string()).or_insert(0) += 1;
    }
}

/// Count descending, name ascending on ties, truncated to `limit`.
fn ranked(counts: BTreeMap<String, usize>, limit: usize) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{award, exclusion};

    #[test]
    fn test_components_counted_from_notes() {
        let records = vec![
            exclusion("A", Some("EPA | Reciprocal | Ineligible"), Some((2020, 1, 1))),
            exclusion("B", Some("EPA | Reciprocal | Ineligible"), Some((2020, 6, 1))),
            exclusion("C", Some("Treasury | OFAC | Prohibition"), Some((2021, 3, 3))),
            exclusion("A", Some("EPA | Procurement | Ineligible"), None),
            award("Ignored", Some("100")),
        ];

        let patterns = analyze(&records);
        assert_eq!(patterns.total_exclusions, 4);
        assert_eq!(patterns.unique_excluded_vendors, 3);
        assert_eq!(
            patterns.top_agencies,
            vec![("EPA".to_string(), 3), ("Treasury".to_string(), 1)]
        );
        assert_eq!(
            patterns.top_programs,
            vec![
                ("Reciprocal".to_string(), 2),
                ("OFAC".to_string(), 1),
                ("Procurement".to_string(), 1),
            ]
        );
        assert_eq!(
            patterns.exclusion_types,
            vec![("Ineligible".to_string(), 3), ("Prohibition".to_string(), 1)]
        );
        assert_eq!(patterns.records_by_year, vec![(2020, 2), (2021, 1)]);
    }

    #[test]
    fn test_partial_notes_skip_missing_components() {
        // only agency and program present
        let records = vec![exclusion("A", Some("EPA | Reciprocal"), None)];

        let patterns = analyze(&records);
        assert_eq!(patterns.top_agencies, vec![("EPA".to_string(), 1)]);
        assert_eq!(patterns.top_programs, vec![("Reciprocal".to_string(), 1)]);
        assert!(patterns.exclusion_types.is_empty());
        assert!(patterns.records_by_year.is_empty());
    }

    #[test]
    fn test_noteless_records_still_counted() {
        let records = vec![exclusion("A", None, Some((2019, 2, 2)))];

        let patterns = analyze(&records);
        assert_eq!(patterns.total_exclusions, 1);
        assert!(patterns.top_agencies.is_empty());
        assert_eq!(patterns.records_by_year, vec![(2019, 1)]);
    }

    #[test]
    fn test_rankings_truncate_to_top_ten() {
        let records: Vec<_> = (0..12)
            .map(|i| {
                let notes = format!("Agency {:02} | P | T", i);
                exclusion("V", Some(&notes), None)
            })
            .collect();

        let patterns = analyze(&records);
        assert_eq!(patterns.top_agencies.len(), 10);
        // equal counts rank by name
        assert_eq!(patterns.top_agencies[0].0, "Agency 00");
    }
}
