//! Merges normalizer output into the canonical dataset: whitespace scrub,
//! exact-duplicate removal, deterministic sort. Running the pipeline twice
//! over the same sources yields byte-identical output.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::CanonicalRecord;
use crate::normalize::coerce::non_empty;

/// Build the canonical dataset from per-source batches.
pub fn unify(batches: Vec<Vec<CanonicalRecord>>) -> Vec<CanonicalRecord> {
    let mut records: Vec<CanonicalRecord> = batches.into_iter().flatten().map(scrub).collect();

    // first occurrence wins; order is settled by the sort below anyway
    let mut seen = HashSet::with_capacity(records.len());
    records.retain(|record| seen.insert(record.clone()));

    records.sort_by(canonical_order);
    records
}

/// Trim every string field. Optional fields that trim to empty become
/// absent so no placeholder leaks into analytics.
fn scrub(mut record: CanonicalRecord) -> CanonicalRecord {
    record.country = record.country.trim().to_string();
    record.record_source = record.record_source.trim().to_string();
    record.vendor_name = record.vendor_name.trim().to_string();
    record.source_url = record.source_url.trim().to_string();
    record.government_identifier = record.government_identifier.as_deref().and_then(non_empty);
    record.record_id = record.record_id.as_deref().and_then(non_empty);
    record.currency = record.currency.as_deref().and_then(non_empty);
    record.notes = record.notes.as_deref().and_then(non_empty);
    record
}

/// `(country, record_type, vendor_name, record_date, record_id)` ascending,
/// record types compared by their serialized names, absent values sorting
/// after present ones within each key.
pub fn canonical_order(a: &CanonicalRecord, b: &CanonicalRecord) -> Ordering {
    a.country
        .cmp(&b.country)
        .then_with(|| a.record_type.as_str().cmp(b.record_type.as_str()))
        .then_with(|| a.vendor_name.cmp(&b.vendor_name))
        .then_with(|| none_last(&a.record_date, &b.record_date))
        .then_with(|| none_last(&a.record_id, &b.record_id))
}

fn none_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordType;
    use chrono::NaiveDate;

    fn record(
        country: &str,
        record_type: RecordType,
        vendor: &str,
        date: Option<(i32, u32, u32)>,
        id: Option<&str>,
    ) -> CanonicalRecord {
        CanonicalRecord {
            country: country.to_string(),
            record_type,
            record_source: "src".to_string(),
            vendor_name: vendor.to_string(),
            government_identifier: None,
            record_id: id.map(|s| s.to_string()),
            record_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            value: None,
            currency: None,
            notes: None,
            source_url: "url".to_string(),
        }
    }

    #[test]
    fn test_exact_duplicates_collapse() {
        let a = record("United States", RecordType::Exclusion, "Acme", None, Some("S1"));
        let dataset = unify(vec![vec![a.clone(), a.clone()], vec![a.clone()]]);
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_near_duplicates_survive() {
        let a = record("United States", RecordType::Exclusion, "Acme", None, Some("S1"));
        let mut b = a.clone();
        b.notes = Some("different".to_string());
        let dataset = unify(vec![vec![a, b]]);
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_sort_order() {
        let dataset = unify(vec![vec![
            record("Uzbekistan", RecordType::ContractAward, "Beta", Some((2021, 1, 1)), None),
            record("United States", RecordType::Exclusion, "Zeta", None, None),
            record("United States", RecordType::Exclusion, "Alpha", None, Some("S2")),
            record("United States", RecordType::Exclusion, "Alpha", None, Some("S1")),
            record("United States", RecordType::Exclusion, "Alpha", Some((2020, 5, 5)), None),
            record("Uzbekistan", RecordType::ContractAward, "Beta", None, None),
        ]]);

        let keys: Vec<(&str, &str, Option<NaiveDate>, Option<&str>)> = dataset
            .iter()
            .map(|r| {
                (
                    r.country.as_str(),
                    r.vendor_name.as_str(),
                    r.record_date,
                    r.record_id.as_deref(),
                )
            })
            .collect();

        assert_eq!(
            keys,
            vec![
                // dated record before dateless ones, then by id, absent id last
                ("United States", "Alpha", NaiveDate::from_ymd_opt(2020, 5, 5), None),
                ("United States", "Alpha", None, Some("S1")),
                ("United States", "Alpha", None, Some("S2")),
                ("United States", "Zeta", None, None),
                ("Uzbekistan", "Beta", NaiveDate::from_ymd_opt(2021, 1, 1), None),
                ("Uzbekistan", "Beta", None, None),
            ]
        );
    }

    #[test]
    fn test_record_type_orders_by_serialized_name() {
        // "contract_award" < "exclusion" lexicographically
        let dataset = unify(vec![vec![
            record("X", RecordType::Exclusion, "V", None, None),
            record("X", RecordType::ContractAward, "V", None, None),
        ]]);
        assert_eq!(dataset[0].record_type, RecordType::ContractAward);
        assert_eq!(dataset[1].record_type, RecordType::Exclusion);
    }

    #[test]
    fn test_scrub_trims_and_drops_empty_optionals() {
        let mut raw = record("United States", RecordType::Exclusion, "Acme", None, None);
        raw.vendor_name = "  Acme Corp  ".to_string();
        raw.government_identifier = Some("  ".to_string());
        raw.notes = Some(" kept ".to_string());

        let dataset = unify(vec![vec![raw]]);
        assert_eq!(dataset[0].vendor_name, "Acme Corp");
        assert_eq!(dataset[0].government_identifier, None);
        assert_eq!(dataset[0].notes.as_deref(), Some("kept"));
    }

    #[test]
    fn test_unify_idempotent() {
        let batch = vec![
            record("Uzbekistan", RecordType::ContractAward, "Beta", Some((2021, 1, 1)), Some("L1")),
            record("United States", RecordType::Exclusion, "Acme", None, Some("S1")),
            record("United States", RecordType::Exclusion, "Acme", None, Some("S1")),
        ];
        let once = unify(vec![batch]);
        let twice = unify(vec![once.clone()]);
        assert_eq!(once, twice);
    }
}
