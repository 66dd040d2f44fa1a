//! Value statistics over the contract-award records. All arithmetic stays
//! in exact decimals; nothing here goes through floating point.

use std::collections::BTreeMap;

use bigdecimal::{BigDecimal, Zero};

use crate::models::{CanonicalRecord, RecordType};

const TOP_N: usize = 20;

/// Per-vendor spend aggregate for the by-value ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorSpend {
    pub vendor_name: String,
    pub total_value: BigDecimal,
    pub contract_count: usize,
    pub avg_value: BigDecimal,
}

/// Award-value statistics over one dataset.
#[derive(Debug, Clone)]
pub struct ContractStats {
    pub total_contracts: usize,
    pub contracts_with_value: usize,
    pub total_value: BigDecimal,
    pub mean_value: Option<BigDecimal>,
    pub median_value: Option<BigDecimal>,
    pub max_value: Option<BigDecimal>,
    pub min_value: Option<BigDecimal>,
    /// Vendors by award count; count descending, name ascending on ties.
    pub top_by_count: Vec<(String, usize)>,
    /// Vendors by summed value over priced awards only.
    pub top_by_value: Vec<VendorSpend>,
}

pub fn analyze(records: &[CanonicalRecord]) -> ContractStats {
    let awards: Vec<&CanonicalRecord> = records
        .iter()
        .filter(|r| r.record_type == RecordType::ContractAward)
        .collect();

    let mut values: Vec<&BigDecimal> = awards.iter().filter_map(|r| r.value.as_ref()).collect();
    values.sort();

    let total_value = values
        .iter()
        .fold(BigDecimal::zero(), |acc, value| acc + *value);
    let mean_value = if values.is_empty() {
        None
    } else {
        Some(&total_value / BigDecimal::from(values.len() as u64))
    };

    let mut by_count: BTreeMap<&str, usize> = BTreeMap::new();
    for award in &awards {
        *by_count.entry(award.vendor_name.as_str()).or_insert(0) += 1;
    }
    let mut top_by_count: Vec<(String, usize)> = by_count
        .into_iter()
        .map(|(vendor, count)| (vendor.to_string(), count))
        .collect();
    top_by_count.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_by_count.truncate(TOP_N);

    let mut spend: BTreeMap<&str, (BigDecimal, usize)> = BTreeMap::new();
    for award in &awards {
        if let Some(value) = &award.value {
            let entry = spend
                .entry(award.vendor_name.as_str())
                .or_insert_with(|| (BigDecimal::zero(), 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }
    let mut top_by_value: Vec<VendorSpend> = spend
        .into_iter()
        .map(|(vendor, (total, count))| VendorSpend {
            vendor_name: vendor.to_string(),
            avg_value: &total / BigDecimal::from(count as u64),
            total_value: total,
            contract_count: count,
        })
        .collect();
    top_by_value.sort_by(|a, b| {
        b.total_value
            .cmp(&a.total_value)
            .then_with(|| a.vendor_name.cmp(&b.vendor_name))
    });
    top_by_value.truncate(TOP_N);

    ContractStats {
        total_contracts: awards.len(),
        contracts_with_value: values.len(),
        median_value: median(&values),
        max_value: values.last().map(|v| (*v).clone()),
        min_value: values.first().map(|v| (*v).clone()),
        total_value,
        mean_value,
        top_by_count,
        top_by_value,
    }
}

/// Middle element of the sorted values; even-length inputs interpolate
/// the middle pair.
fn median(sorted: &[&BigDecimal]) -> Option<BigDecimal> {
    if sorted.is_empty() {
        return None;
    }
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid].clone())
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / BigDecimal::from(2u32))
    }
}
