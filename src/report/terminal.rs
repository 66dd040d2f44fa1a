use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::analytics::crossref::CrossBorderMatch;
use crate::analytics::{whole_grouped, AnalyticsBundle};
use crate::models::VendorRiskProfile;
use crate::normalize::{awards, exclusions};

const TOP_ROWS: usize = 5;

/// Render the colored console report.
pub fn render(analytics: &AnalyticsBundle, verbose: bool, quiet: bool) -> Result<()> {
    let summary = &analytics.summary;

    if quiet {
        println!(
            "Records: {}  Vendors: {}  Flagged: {}  Cross-border: {}",
            summary.total_records,
            summary.unique_vendors,
            analytics.risk_profiles.len().to_string().red(),
            analytics.cross_border.len().to_string().yellow(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}\n",
        "foia-vendor-risk".bold(),
        env!("CARGO_PKG_VERSION")
    );

    section("DATASET SUMMARY");
    println!(" Total Records: {}", count(summary.total_records));
    println!(" Unique Vendors: {}", count(summary.unique_vendors));
    println!(" Countries Covered: {}", summary.countries);
    match (summary.date_range_start, summary.date_range_end) {
        (Some(start), Some(end)) => println!(" Date Range: {} to {}", start, end),
        _ => println!(" Date Range: {}", "n/a".dimmed()),
    }
    println!(" US Exclusions: {}", count(summary.exclusion_records));
    println!(" Uzbek Contract Awards: {}", count(summary.contract_award_records));
    println!(" Records with Value Data: {}", count(summary.records_with_value));
    if summary.total_contract_value > bigdecimal::BigDecimal::from(0) {
        println!(
            " Total Contract Value: {} UZS",
            whole_grouped(&summary.total_contract_value)
        );
    }
    println!();

    section("US SAM EXCLUSIONS ANALYSIS");
    let patterns = &analytics.patterns;
    if patterns.total_exclusions == 0 {
        println!(" No exclusion records in the dataset");
    } else {
        println!(" Total Exclusions: {}", count(patterns.total_exclusions));
        println!(
            " Unique Excluded Vendors: {}",
            count(patterns.unique_excluded_vendors)
        );
        println!("\n Top Excluding Agencies:");
        for (agency, n) in ranked_rows(&patterns.top_agencies, verbose) {
            println!("   {}: {}", agency, count(*n));
        }
    }
    println!();

    section("UZBEKISTAN CONTRACTS ANALYSIS");
    let contracts = &analytics.contracts;
    println!(" Total Contracts: {}", count(contracts.total_contracts));
    println!(" Contracts with Value: {}", count(contracts.contracts_with_value));
    if contracts.contracts_with_value > 0 {
        println!(" Total Value: {} UZS", whole_grouped(&contracts.total_value));
        if let Some(mean) = &contracts.mean_value {
            println!(" Mean Value: {} UZS", whole_grouped(mean));
        }
        if let Some(median) = &contracts.median_value {
            println!(" Median Value: {} UZS", whole_grouped(median));
        }
        if let Some(max) = &contracts.max_value {
            println!(" Max Value: {} UZS", whole_grouped(max));
        }
    }
    if !contracts.top_by_count.is_empty() {
        println!("\n Top Vendors by Contract Count:");
        for (vendor, n) in ranked_rows(&contracts.top_by_count, verbose) {
            println!("   {}: {}", vendor, n);
        }
    }
    println!();

    section("CROSS-BORDER VENDOR ANALYSIS");
    if analytics.cross_border.is_empty() {
        println!(" No exact name matches found between jurisdictions");
    } else {
        println!(
            " Potential cross-border vendors found: {}",
            analytics.cross_border.len().to_string().yellow().bold()
        );
        println!(" (Requires manual verification)\n");
        render_cross_border_table(&analytics.cross_border);
    }
    println!();

    section("VENDOR RISK ANALYSIS");
    if analytics.risk_profiles.is_empty() {
        println!(" No high-risk indicators identified");
    } else {
        println!(
            " Vendors with risk indicators: {}",
            analytics.risk_profiles.len().to_string().red().bold()
        );
        let shown = if verbose {
            analytics.risk_profiles.len()
        } else {
            TOP_ROWS.min(analytics.risk_profiles.len())
        };
        println!(" Top {} high-risk vendors:\n", shown);
        render_risk_table(&analytics.risk_profiles[..shown]);
    }
    println!();

    section("DATA TRANSPARENCY METRICS");
    let transparency = &analytics.transparency;
    println!(" Data Completeness:");
    for (field, pct) in &transparency.completeness {
        println!("   {}: {:.1}%", field, pct);
    }
    println!(
        "\n Overall Data Quality Score: {}%",
        format!("{:.2}", transparency.data_quality_score).bold()
    );
    println!("\n Data Sources:");
    for (country, n) in &transparency.sources_by_country {
        println!("   {}: {}", country, n);
    }
    println!("   Total Unique Sources: {}", transparency.total_sources);
    println!();

    Ok(())
}

fn section(title: &str) {
    println!(" {}", title.cyan().bold());
    println!(" {}", "─".repeat(64).dimmed());
}

fn count(n: usize) -> String {
    crate::analytics::group_digits(&n.to_string())
}

/// Top five rows unless `--verbose` asks for everything.
fn ranked_rows<'a, T>(rows: &'a [(String, T)], verbose: bool) -> &'a [(String, T)] {
    if verbose {
        rows
    } else {
        &rows[..TOP_ROWS.min(rows.len())]
    }
}

fn render_cross_border_table(matches: &[CrossBorderMatch]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Vendor").add_attribute(Attribute::Bold),
            Cell::new("US Records").add_attribute(Attribute::Bold),
            Cell::new("Uzbek Records").add_attribute(Attribute::Bold),
        ]);

    for m in matches {
        table.add_row(vec![
            Cell::new(&m.vendor_name),
            Cell::new(m.country_count(exclusions::COUNTRY)).set_alignment(CellAlignment::Right),
            Cell::new(m.country_count(awards::COUNTRY)).set_alignment(CellAlignment::Right),
        ]);
    }

    println!("{}", table);
}

fn render_risk_table(profiles: &[VendorRiskProfile]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Vendor").add_attribute(Attribute::Bold),
            Cell::new("Score").add_attribute(Attribute::Bold),
            Cell::new("Risk Factors").add_attribute(Attribute::Bold),
            Cell::new("Records").add_attribute(Attribute::Bold),
            Cell::new("Countries").add_attribute(Attribute::Bold),
        ]);

    for profile in profiles {
        let score_color = match profile.risk_score {
            0..=9 => Color::Green,
            10..=19 => Color::Yellow,
            _ => Color::Red,
        };

        table.add_row(vec![
            Cell::new(&profile.vendor_name),
            Cell::new(profile.risk_score)
                .fg(score_color)
                .set_alignment(CellAlignment::Right),
            Cell::new(profile.factors_joined()),
            Cell::new(profile.total_records).set_alignment(CellAlignment::Right),
            Cell::new(profile.countries_joined()),
        ]);
    }

    println!("{}", table);
}
