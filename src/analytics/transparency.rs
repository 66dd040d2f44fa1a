//! Data-quality metrics: per-field completeness, an aggregate quality
//! score, and how many distinct sources the dataset draws on.

use std::collections::{BTreeMap, HashSet};

use anyhow::{bail, Result};

use crate::models::CanonicalRecord;

/// Completeness and coverage for one dataset.
#[derive(Debug, Clone)]
pub struct TransparencyReport {
    /// `(field, percent present)` in configured order.
    pub completeness: Vec<(String, f64)>,
    /// Mean of the completeness percentages, rounded to two decimals.
    pub data_quality_score: f64,
    /// Distinct source URLs across the whole dataset.
    pub total_sources: usize,
    /// Distinct source URLs per country, ordered by country.
    pub sources_by_country: BTreeMap<String, usize>,
}

/// Assess the configured fields. Unknown field names are a configuration
/// mistake and fail the run rather than reporting a silent zero.
pub fn assess(records: &[CanonicalRecord], fields: &[String]) -> Result<TransparencyReport> {
    let mut completeness = Vec::with_capacity(fields.len());
    for field in fields {
        completeness.push((field.clone(), completeness_pct(records, field)?));
    }

    let data_quality_score = if completeness.is_empty() {
        0.0
    } else {
        round2(completeness.iter().map(|(_, pct)| pct).sum::<f64>() / completeness.len() as f64)
    };

    let mut all_sources: HashSet<&str> = HashSet::new();
    let mut by_country: BTreeMap<String, HashSet<&str>> = BTreeMap::new();
    for record in records {
        all_sources.insert(record.source_url.as_str());
        by_country
            .entry(record.country.clone())
            .or_default()
            .insert(record.source_url.as_str());
    }

    Ok(TransparencyReport {
        completeness,
        data_quality_score,
        total_sources: all_sources.len(),
        sources_by_country: by_country
            .into_iter()
            .map(|(country, sources)| (country, sources.len()))
            .collect(),
    })
}

fn completeness_pct(records: &[CanonicalRecord], field: &str) -> Result<f64> {
    if records.is_empty() {
        return Ok(0.0);
    }
    let mut present = 0usize;
    for record in records {
        if field_present(record, field)? {
            present += 1;
        }
    }
    Ok(100.0 * present as f64 / records.len() as f64)
}

fn field_present(record: &CanonicalRecord, field: &str) -> Result<bool> {
    Ok(match field {
        "country" => !record.country.is_empty(),
        "record_type" => true,
        "record_source" => !record.record_source.is_empty(),
        "vendor_name" => !record.vendor_name.is_empty(),
        "government_identifier" => record.government_identifier.is_some(),
        "record_id" => record.record_id.is_some(),
        "record_date" => record.record_date.is_some(),
        "value" => record.value.is_some(),
        "currency" => record.currency.is_some(),
        "notes" => record.notes.is_some(),
        "source_url" => !record.source_url.is_empty(),
        other => bail!("unknown completeness field: {}", other),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
