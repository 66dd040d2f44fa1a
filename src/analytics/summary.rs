//! Whole-dataset roll-up used by the summary artifact and the console
//! report header.

use std::collections::HashSet;

use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;

use crate::models::{CanonicalRecord, RecordType};

#[derive(Debug, Clone)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub unique_vendors: usize,
    pub countries: usize,
    pub date_range_start: Option<NaiveDate>,
    pub date_range_end: Option<NaiveDate>,
    pub exclusion_records: usize,
    pub contract_award_records: usize,
    pub records_with_value: usize,
    pub total_contract_value: BigDecimal,
}

pub fn summarize(records: &[CanonicalRecord]) -> DatasetSummary {
    let unique_vendors = records
        .iter()
        .map(|r| r.vendor_name.as_str())
        .collect::<HashSet<_>>()
        .len();
    let countries = records
        .iter()
        .map(|r| r.country.as_str())
        .collect::<HashSet<_>>()
        .len();
    let dates: Vec<NaiveDate> = records.iter().filter_map(|r| r.record_date).collect();

    DatasetSummary {
        total_records: records.len(),
        unique_vendors,
        countries,
        date_range_start: dates.iter().min().copied(),
        date_range_end: dates.iter().max().copied(),
        exclusion_records: records
            .iter()
            .filter(|r| r.record_type == RecordType::Exclusion)
            .count(),
        contract_award_records: records
            .iter()
            .filter(|r| r.record_type == RecordType::ContractAward)
            .count(),
        records_with_value: records.iter().filter(|r| r.value.is_some()).count(),
        total_contract_value: records
            .iter()
            .filter_map(|r| r.value.as_ref())
            .fold(BigDecimal::zero(), |acc, value| acc + value),
    }
}
