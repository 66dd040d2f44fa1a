//! Additive per-vendor risk indicators. Scores are coarse triage hints for
//! FOIA targeting, not adjudications.

use bigdecimal::BigDecimal;

use crate::models::{CanonicalRecord, RecordType, VendorRiskProfile};

use super::{group_by_vendor, whole_grouped};

const EXCLUSION_WEIGHT: u32 = 10;
const HIGH_VALUE_BONUS: u32 = 5;
const CROSS_BORDER_BONUS: u32 = 15;

/// Score every vendor in the dataset. Vendors scoring zero are omitted.
/// Sorted by score descending; ties stay in vendor-name order.
pub fn score_vendors(
    records: &[CanonicalRecord],
    high_value_threshold: &BigDecimal,
) -> Vec<VendorRiskProfile> {
    let mut profiles: Vec<VendorRiskProfile> = group_by_vendor(records)
        .into_iter()
        .filter_map(|(vendor, group)| score_vendor(vendor, &group, high_value_threshold))
        .collect();
    profiles.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
    profiles
}

fn score_vendor(
    vendor: &str,
    group: &[&CanonicalRecord],
    high_value_threshold: &BigDecimal,
) -> Option<VendorRiskProfile> {
    let mut risk_score = 0;
    let mut risk_factors = Vec::new();

    let exclusion_count = group
        .iter()
        .filter(|r| r.record_type == RecordType::Exclusion)
        .count();
    if exclusion_count > 0 {
        risk_score += EXCLUSION_WEIGHT * exclusion_count as u32;
        risk_factors.push(format!("{} exclusion(s)", exclusion_count));
    }

    // one bonus on the largest award, however many exceed the threshold
    let max_award = group
        .iter()
        .filter(|r| r.record_type == RecordType::ContractAward)
        .filter_map(|r| r.value.as_ref())
        .max();
    if let Some(max_award) = max_award {
        if max_award > high_value_threshold {
            risk_score += HIGH_VALUE_BONUS;
            risk_factors.push(format!("High-value contract ({})", whole_grouped(max_award)));
        }
    }

    let countries: std::collections::BTreeSet<String> =
        group.iter().map(|r| r.country.clone()).collect();
    if countries.len() > 1 {
        risk_score += CROSS_BORDER_BONUS;
        risk_factors.push("Cross-border activity".to_string());
    }

    if risk_score == 0 {
        return None;
    }
    Some(VendorRiskProfile {
        vendor_name: vendor.to_string(),
        risk_score,
        risk_factors,
        total_records: group.len(),
        countries,
    })
}
