//! Normalizer for Uzbekistan procurement-award extracts. Each file carries
//! its own header vocabulary (English, Uzbek or Russian, inconsistent
//! casing), so every logical field is resolved per file before any row is
//! read.

use crate::models::{CanonicalRecord, RecordType};
use crate::normalize::coerce::{non_empty, parse_amount, parse_date};
use crate::normalize::columns::resolve_column;
use crate::table::{Row, SourceTable};

pub const COUNTRY: &str = "Uzbekistan";
pub const RECORD_SOURCE: &str = "Uzbekistan Open Data Portal procurement extracts";

/// Column positions resolved for one file. Any field may be unresolved;
/// only the vendor column is mandatory.
#[derive(Debug)]
struct AwardColumns {
    vendor: Option<usize>,
    tax_id: Option<usize>,
    contract: Option<usize>,
    date: Option<usize>,
    amount: Option<usize>,
    currency: Option<usize>,
    subject: Option<usize>,
    purchase_type: Option<usize>,
    platform: Option<usize>,
    funding: Option<usize>,
}

impl AwardColumns {
    /// Candidate lists cover the header variants seen across the portal's
    /// extracts, ordered most- to least-specific.
    fn resolve(headers: &[String]) -> Self {
        Self {
            vendor: resolve_column(
                headers,
                &[
                    "Name of supplier",
                    "Supplier of goods",
                    "Supplier",
                    "Ишлаб чиқарувчи",
                ],
            ),
            tax_id: resolve_column(headers, &["STIR", "TIN", "ИНН", "pinfl"]),
            contract: resolve_column(headers, &["Contract number", "Лот/шартнома", "Лот", "Lot"]),
            date: resolve_column(
                headers,
                &[
                    "Date of conclusion",
                    "Дата договора",
                    "Date of contract",
                    "Date of registration",
                ],
            ),
            amount: resolve_column(
                headers,
                &["Contract amount", "Amount", "amount of money", "Price"],
            ),
            currency: resolve_column(headers, &["Currency"]),
            subject: resolve_column(
                headers,
                &["subject", "Product name", "товарлар", "Public procurements"],
            ),
            purchase_type: resolve_column(
                headers,
                &["Purchase type", "type of purchase", "амалга"],
            ),
            platform: resolve_column(headers, &["Platform name"]),
            funding: resolve_column(headers, &["Source of funding", "Source of funds", "Source"]),
        }
    }
}

/// Normalize one procurement file. `None` means no vendor column could be
/// resolved and the whole file is skipped; that is a data-quality decision,
/// not an error. Rows whose vendor cell is empty are dropped individually.
pub fn normalize(table: &SourceTable, dataset_id: &str) -> Option<Vec<CanonicalRecord>> {
    let columns = AwardColumns::resolve(table.headers());
    let vendor = columns.vendor?;
    let source_url = format!("https://data.egov.uz/datasets/{}", dataset_id);

    Some(
        table
            .rows()
            .filter_map(|row| normalize_row(row, &columns, vendor, &source_url))
            .collect(),
    )
}

fn normalize_row(
    row: Row<'_>,
    columns: &AwardColumns,
    vendor: usize,
    source_url: &str,
) -> Option<CanonicalRecord> {
    let vendor_name = non_empty(row.cell(vendor))?;

    Some(CanonicalRecord {
        country: COUNTRY.to_string(),
        record_type: RecordType::ContractAward,
        record_source: RECORD_SOURCE.to_string(),
        vendor_name,
        government_identifier: columns.tax_id.and_then(|i| non_empty(row.cell(i))),
        record_id: columns.contract.and_then(|i| non_empty(row.cell(i))),
        record_date: columns.date.and_then(|i| parse_date(row.cell(i))),
        value: columns.amount.and_then(|i| parse_amount(row.cell(i))),
        currency: columns.currency.and_then(|i| non_empty(row.cell(i))),
        notes: notes(row, columns),
        source_url: source_url.to_string(),
    })
}

/// One `Label: value` fragment per resolved descriptive column, in fixed
/// order, joined with `" | "`. Files where none resolve carry no notes.
fn notes(row: Row<'_>, columns: &AwardColumns) -> Option<String> {
    let labeled = [
        ("Purchase type", columns.purchase_type),
        ("Platform", columns.platform),
        ("Subject", columns.subject),
        ("Funding source", columns.funding),
    ];
    let fragments: Vec<String> = labeled
        .into_iter()
        .filter_map(|(label, column)| {
            column.map(|i| format!("{}: {}", label, row.cell(i).trim()))
        })
        .collect();
    if fragments.is_empty() {
        None
    } else {
        Some(fragments.join(" | "))
    }
}
