use std::path::Path;

use anyhow::Result;
use bigdecimal::BigDecimal;
use serde::Deserialize;

/// Root configuration structure, deserialized from
/// `.foia-vendor-risk/config.toml`.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Risk-scoring knobs.
    #[serde(default)]
    pub risk: RiskConfig,
    /// Data-quality metric knobs.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Scoring weights are fixed; only the high-value threshold is tunable.
#[derive(Debug, Deserialize)]
pub struct RiskConfig {
    /// Award value above which the high-value bonus applies, in the source
    /// currency unit (no conversion is attempted).
    #[serde(default = "default_high_value_threshold")]
    pub high_value_threshold: i64,
}

#[derive(Debug, Deserialize)]
pub struct MetricsConfig {
    /// Canonical fields measured for completeness, in report order.
    #[serde(default = "default_completeness_fields")]
    pub completeness_fields: Vec<String>,
}

fn default_high_value_threshold() -> i64 {
    1_000_000
}

fn default_completeness_fields() -> Vec<String> {
    ["vendor_name", "government_identifier", "record_date", "value", "notes"]
        .iter()
        .map(|field| field.to_string())
        .collect()
}

impl Default for RiskConfig {
    fn default() -> Self {
        RiskConfig {
            high_value_threshold: default_high_value_threshold(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        MetricsConfig {
            completeness_fields: default_completeness_fields(),
        }
    }
}

impl Default for Config {
    /// Built-in defaults used when no config file is found.
    fn default() -> Self {
        Config {
            risk: RiskConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Config {
    /// The threshold as an exact decimal for comparison against award values.
    pub fn high_value_threshold(&self) -> BigDecimal {
        BigDecimal::from(self.risk.high_value_threshold)
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<data_dir>/.foia-vendor-risk/config.toml`
/// 3. `~/.config/foia-vendor-risk/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(data_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let local_config = data_dir.join(".foia-vendor-risk").join("config.toml");
    if local_config.exists() {
        let content = std::fs::read_to_string(&local_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("foia-vendor-risk")
            .join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}
