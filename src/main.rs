//! `foia-vendor-risk` — build a cross-jurisdiction vendor dataset from
//! public procurement and debarment extracts, then derive risk analytics.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Discover source extracts ([`detector::discover_sources`]).
//! 4. Normalize each source into canonical records ([`normalize`]).
//! 5. Unify into the deduplicated, sorted dataset ([`unify`]).
//! 6. Derive analytics ([`analytics`]).
//! 7. Write the CSV artifacts ([`report::csv`]) and console report
//!    ([`report::terminal`]).

mod analytics;
mod cli;
mod config;
mod detector;
mod models;
mod normalize;
mod report;
mod table;
mod unify;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cli::Cli;
use config::load_config;
use detector::{discover_sources, Sources};
use models::CanonicalRecord;
use table::SourceTable;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.data_dir, cli.config.as_deref())?;
    if let Some(threshold) = cli.threshold {
        config.risk.high_value_threshold = threshold;
    }

    let sources = discover_sources(&cli.data_dir)?;
    if sources.is_empty() {
        eprintln!("No source extracts found under {}", cli.data_dir.display());
        std::process::exit(1);
    }

    let batches = normalize_sources(&sources, cli.quiet)?;
    let dataset = unify::unify(batches);
    if !cli.quiet {
        eprintln!("  {} {} canonical records", "→".cyan(), dataset.len());
    }

    let analytics = analytics::run_all(&dataset, &config)?;

    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    report::csv::write_all(&cli.output, &dataset, &analytics)?;
    if !cli.quiet {
        eprintln!(
            "  {} artifacts written to {}",
            "→".cyan(),
            cli.output.display()
        );
    }

    report::terminal::render(&analytics, cli.verbose, cli.quiet)?;

    Ok(())
}

/// Normalize every discovered source into canonical-record batches.
/// Unreadable or unusable files are warned about and skipped; the run only
/// aborts earlier, when no sources exist at all.
fn normalize_sources(sources: &Sources, quiet: bool) -> Result<Vec<Vec<CanonicalRecord>>> {
    let mut batches = Vec::new();

    match &sources.exclusions {
        Some(path) => match SourceTable::from_csv_path(path) {
            Ok(table) => {
                let records = normalize::exclusions::normalize(&table);
                if !quiet {
                    eprintln!(
                        "  {} {} exclusion records from {}",
                        "→".cyan(),
                        records.len(),
                        path.display()
                    );
                }
                batches.push(records);
            }
            Err(err) => eprintln!("  {} skipping {}: {:#}", "⚠".yellow(), path.display(), err),
        },
        None => eprintln!("  {} no USA exclusions extract found", "⚠".yellow()),
    }

    if sources.awards.is_empty() {
        eprintln!("  {} no Uzbekistan procurement files found", "⚠".yellow());
        return Ok(batches);
    }

    let pb = if !quiet && sources.awards.len() > 1 {
        let pb = ProgressBar::new(sources.awards.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut award_records = 0usize;
    for path in &sources.awards {
        let dataset_id = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        if let Some(pb) = &pb {
            pb.set_message(dataset_id.to_string());
        }

        match SourceTable::load(path) {
            Ok(table) => match normalize::awards::normalize(&table, dataset_id) {
                Some(records) => {
                    award_records += records.len();
                    batches.push(records);
                }
                None => warn(
                    &pb,
                    &format!("skipping {}: no supplier column", path.display()),
                ),
            },
            Err(err) => warn(&pb, &format!("skipping {}: {:#}", path.display(), err)),
        }

        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    if !quiet {
        eprintln!(
            "  {} {} award records from {} files",
            "→".cyan(),
            award_records,
            sources.awards.len()
        );
    }

    Ok(batches)
}

/// Route warnings through the progress bar when one is drawn so they stay
/// visible above it.
fn warn(pb: &Option<ProgressBar>, message: &str) {
    let line = format!("  {} {}", "⚠".yellow(), message);
    match pb {
        Some(pb) => pb.println(line),
        None => eprintln!("{}", line),
    }
}
