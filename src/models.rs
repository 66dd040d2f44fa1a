use std::collections::BTreeSet;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the unified vendor-risk dataset.
///
/// Field order is the canonical column order of the dataset artifact, so the
/// struct serializes straight into the output CSV. String-typed optionals are
/// `None` when the source cell was missing, empty after trimming, or (for
/// dates and amounts) unparseable — absent and unparseable are never
/// distinguished downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub country: String,
    pub record_type: RecordType,
    pub record_source: String,
    /// Join key for all downstream analytics; normalizers drop rows where
    /// this would be empty.
    pub vendor_name: String,
    pub government_identifier: Option<String>,
    pub record_id: Option<String>,
    pub record_date: Option<NaiveDate>,
    pub value: Option<BigDecimal>,
    pub currency: Option<String>,
    pub notes: Option<String>,
    pub source_url: String,
}

/// The two kinds of source records the pipeline unifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Exclusion,
    ContractAward,
}

impl RecordType {
    /// Serialized form, also used as the sort key so ordering matches the
    /// flat-file representation (`contract_award` < `exclusion`).
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Exclusion => "exclusion",
            RecordType::ContractAward => "contract_award",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived risk profile for one vendor; recomputed in full on every run.
#[derive(Debug, Clone)]
pub struct VendorRiskProfile {
    pub vendor_name: String,
    pub risk_score: u32,
    /// Human-readable reasons, in scoring order.
    pub risk_factors: Vec<String>,
    pub total_records: usize,
    pub countries: BTreeSet<String>,
}

impl VendorRiskProfile {
    /// Factor list joined for display and the CSV artifact.
    pub fn factors_joined(&self) -> String {
        self.risk_factors.join("; ")
    }

    /// Country set joined for display and the CSV artifact.
    pub fn countries_joined(&self) -> String {
        self.countries.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}
