//! CSV artifact writers. Every artifact is rewritten on each run so stale
//! files from earlier runs never survive, including the empty-but-headered
//! case.

use std::path::Path;

use anyhow::{Context, Result};
use bigdecimal::{BigDecimal, RoundingMode};
use csv::{Writer, WriterBuilder};

use crate::analytics::contracts::ContractStats;
use crate::analytics::crossref::CrossBorderMatch;
use crate::analytics::patterns::ExclusionPatterns;
use crate::analytics::summary::DatasetSummary;
use crate::analytics::transparency::TransparencyReport;
use crate::analytics::AnalyticsBundle;
use crate::models::{CanonicalRecord, VendorRiskProfile};
use crate::normalize::{awards, exclusions};

pub const DATASET_FILE: &str = "foia_vendor_risk_dataset.csv";
pub const CODEBOOK_FILE: &str = "foia_vendor_risk_codebook.csv";
pub const EXCLUSIONS_FILE: &str = "exclusions_analysis.csv";
pub const CONTRACT_STATS_FILE: &str = "uzbek_contracts_stats.csv";
pub const CROSS_BORDER_FILE: &str = "cross_border_vendors.csv";
pub const RISK_FILE: &str = "vendor_risk_indicators.csv";
pub const TRANSPARENCY_FILE: &str = "transparency_metrics.csv";
pub const SUMMARY_FILE: &str = "dataset_summary.csv";

/// Canonical column names and their codebook descriptions, in dataset
/// column order.
pub const CODEBOOK: [(&str, &str); 11] = [
    ("country", "Country or sovereign body that published the record."),
    (
        "record_type",
        "Either 'exclusion' from SAM (USA) or 'contract_award' from Uzbekistan procurement extracts.",
    ),
    (
        "record_source",
        "Human-readable citation of the original publication channel.",
    ),
    ("vendor_name", "Primary organization or individual name as published."),
    (
        "government_identifier",
        "Unique identifier or tax ID provided by the source (DUNS/STIR).",
    ),
    (
        "record_id",
        "SAM Number for exclusions or contract number/lot reference for awards.",
    ),
    (
        "record_date",
        "Published effective date (Active Date for exclusions; contract signature date for awards) formatted as YYYY-MM-DD where available.",
    ),
    ("value", "Monetary value when provided (contract amount in Uzbek soum)."),
    ("currency", "ISO or literal currency string as published."),
    (
        "notes",
        "Concatenated contextual metadata (agency, program, purchase type, etc.).",
    ),
    ("source_url", "Landing page for the originating dataset or API."),
];

/// Write every artifact into `output_dir`.
pub fn write_all(
    output_dir: &Path,
    records: &[CanonicalRecord],
    analytics: &AnalyticsBundle,
) -> Result<()> {
    write_dataset(&output_dir.join(DATASET_FILE), records)?;
    write_codebook(&output_dir.join(CODEBOOK_FILE))?;
    write_exclusion_patterns(&output_dir.join(EXCLUSIONS_FILE), &analytics.patterns)?;
    write_contract_stats(&output_dir.join(CONTRACT_STATS_FILE), &analytics.contracts)?;
    write_cross_border(&output_dir.join(CROSS_BORDER_FILE), &analytics.cross_border)?;
    write_risk_indicators(&output_dir.join(RISK_FILE), &analytics.risk_profiles)?;
    write_transparency(&output_dir.join(TRANSPARENCY_FILE), &analytics.transparency)?;
    write_summary(&output_dir.join(SUMMARY_FILE), &analytics.summary)?;
    Ok(())
}

fn open(path: &Path) -> Result<Writer<std::fs::File>> {
    Writer::from_path(path).with_context(|| format!("failed to write {}", path.display()))
}

/// The canonical dataset. The header row is written explicitly so an empty
/// dataset still produces a well-formed file.
pub fn write_dataset(path: &Path, records: &[CanonicalRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    writer.write_record(CODEBOOK.iter().map(|(column, _)| *column))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_codebook(path: &Path) -> Result<()> {
    let mut writer = open(path)?;
    writer.write_record(["column", "description"])?;
    for (column, description) in CODEBOOK {
        writer.write_record([column, description])?;
    }
    writer.flush()?;
    Ok(())
}

/// Long-format `section,key,count` rows: scalar counters first, then the
/// ranked agency/program/type tables, then the yearly trend.
pub fn write_exclusion_patterns(path: &Path, patterns: &ExclusionPatterns) -> Result<()> {
    let mut writer = open(path)?;
    writer.write_record(["section", "key", "count"])?;
    writer.write_record([
        "total_exclusions".to_string(),
        String::new(),
        patterns.total_exclusions.to_string(),
    ])?;
    writer.write_record([
        "unique_excluded_vendors".to_string(),
        String::new(),
        patterns.unique_excluded_vendors.to_string(),
    ])?;
    for (agency, count) in &patterns.top_agencies {
        writer.write_record(["top_agency".to_string(), agency.clone(), count.to_string()])?;
    }
    for (program, count) in &patterns.top_programs {
        writer.write_record(["top_program".to_string(), program.clone(), count.to_string()])?;
    }
    for (exclusion_type, count) in &patterns.exclusion_types {
        writer.write_record([
            "exclusion_type".to_string(),
            exclusion_type.clone(),
            count.to_string(),
        ])?;
    }
    for (year, count) in &patterns.records_by_year {
        writer.write_record([
            "records_by_year".to_string(),
            year.to_string(),
            count.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Single-row value statistics. Absent statistics are written as `0`, the
/// way an empty award set has always been published.
pub fn write_contract_stats(path: &Path, stats: &ContractStats) -> Result<()> {
    let mut writer = open(path)?;
    writer.write_record([
        "total_contracts",
        "contracts_with_value",
        "total_value",
        "mean_value",
        "median_value",
        "max_value",
        "min_value",
    ])?;
    writer.write_record([
        stats.total_contracts.to_string(),
        stats.contracts_with_value.to_string(),
        stats.total_value.to_string(),
        money_or_zero(stats.mean_value.as_ref()),
        money_or_zero(stats.median_value.as_ref()),
        stats.max_value.as_ref().map_or_else(|| "0".to_string(), |v| v.to_string()),
        stats.min_value.as_ref().map_or_else(|| "0".to_string(), |v| v.to_string()),
    ])?;
    writer.flush()?;
    Ok(())
}

pub fn write_cross_border(path: &Path, matches: &[CrossBorderMatch]) -> Result<()> {
    let mut writer = open(path)?;
    writer.write_record(["vendor_name", "us_records", "uzbek_records", "note"])?;
    for m in matches {
        writer.write_record([
            m.vendor_name.clone(),
            m.country_count(exclusions::COUNTRY).to_string(),
            m.country_count(awards::COUNTRY).to_string(),
            m.note.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_risk_indicators(path: &Path, profiles: &[VendorRiskProfile]) -> Result<()> {
    let mut writer = open(path)?;
    writer.write_record([
        "vendor_name",
        "risk_score",
        "risk_factors",
        "total_records",
        "countries",
    ])?;
    for profile in profiles {
        writer.write_record([
            profile.vendor_name.clone(),
            profile.risk_score.to_string(),
            profile.factors_joined(),
            profile.total_records.to_string(),
            profile.countries_joined(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Long-format `metric,value` rows: per-field completeness, the aggregate
/// quality score, then source coverage.
pub fn write_transparency(path: &Path, report: &TransparencyReport) -> Result<()> {
    let mut writer = open(path)?;
    writer.write_record(["metric", "value"])?;
    for (field, pct) in &report.completeness {
        writer.write_record([field.clone(), format!("{:.2}", pct)])?;
    }
    writer.write_record([
        "data_quality_score".to_string(),
        format!("{:.2}", report.data_quality_score),
    ])?;
    writer.write_record(["total_sources".to_string(), report.total_sources.to_string()])?;
    for (country, count) in &report.sources_by_country {
        writer.write_record([format!("sources.{}", country), count.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_summary(path: &Path, summary: &DatasetSummary) -> Result<()> {
    let mut writer = open(path)?;
    writer.write_record([
        "total_records",
        "unique_vendors",
        "countries",
        "date_range_start",
        "date_range_end",
        "us_exclusions",
        "uzbek_awards",
        "records_with_value",
        "total_contract_value",
    ])?;
    writer.write_record([
        summary.total_records.to_string(),
        summary.unique_vendors.to_string(),
        summary.countries.to_string(),
        summary.date_range_start.map_or_else(String::new, |d| d.to_string()),
        summary.date_range_end.map_or_else(String::new, |d| d.to_string()),
        summary.exclusion_records.to_string(),
        summary.contract_award_records.to_string(),
        summary.records_with_value.to_string(),
        summary.total_contract_value.to_string(),
    ])?;
    writer.flush()?;
    Ok(())
}

/// Division-derived statistics are published at two decimal places.
fn money_or_zero(value: Option<&BigDecimal>) -> String {
    match value {
        Some(v) => v.with_scale_round(2, RoundingMode::HalfEven).to_string(),
        None => "0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{award, exclusion};
    use crate::models::RecordType;

    #[test]
    fn test_dataset_header_written_even_when_empty() {
        let file = tempfile::NamedTempFile::new().unwrap();
        write_dataset(file.path(), &[]).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(
            content.trim_end(),
            "country,record_type,record_source,vendor_name,government_identifier,\
             record_id,record_date,value,currency,notes,source_url"
        );
    }

    #[test]
    fn test_dataset_row_serialization() {
        let mut record = exclusion("Acme", Some("EPA | P | T"), Some((2021, 3, 5)));
        record.record_id = Some("S1".to_string());

        let file = tempfile::NamedTempFile::new().unwrap();
        write_dataset(file.path(), &[record]).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "United States,exclusion,src,Acme,,S1,2021-03-05,,,EPA | P | T,url"
        );
    }

    #[test]
    fn test_codebook_covers_all_columns() {
        let file = tempfile::NamedTempFile::new().unwrap();
        write_codebook(file.path()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        // header plus one line per canonical column
        assert_eq!(content.lines().count(), 12);
        assert!(content.starts_with("column,description"));
    }

    #[test]
    fn test_risk_indicator_rows() {
        let profiles = vec![crate::models::VendorRiskProfile {
            vendor_name: "Acme".to_string(),
            risk_score: 30,
            risk_factors: vec!["1 exclusion(s)".to_string(), "Cross-border activity".to_string()],
            total_records: 3,
            countries: ["United States", "Uzbekistan"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }];

        let file = tempfile::NamedTempFile::new().unwrap();
        write_risk_indicators(file.path(), &profiles).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "Acme,30,1 exclusion(s); Cross-border activity,3,\"United States, Uzbekistan\""
        );
    }

    #[test]
    fn test_contract_stats_zero_fill() {
        let records = vec![award("A", None)];
        let stats = crate::analytics::contracts::analyze(&records);

        let file = tempfile::NamedTempFile::new().unwrap();
        write_contract_stats(file.path(), &stats).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(content.lines().nth(1).unwrap(), "1,0,0,0,0,0,0");
    }

    #[test]
    fn test_record_type_serializes_snake_case() {
        let record = crate::analytics::test_support::record(
            "Uzbekistan",
            RecordType::ContractAward,
            "Beta",
        );

        let file = tempfile::NamedTempFile::new().unwrap();
        write_dataset(file.path(), &[record]).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert!(content.lines().nth(1).unwrap().contains(",contract_award,"));
    }
}
