//! Parse-or-absent coercions. Source cells are frequently blank, garbled
//! or in a regional format; anything unparseable becomes `None` so one bad
//! cell never aborts an ingest run.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_FIRST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})(?:[T\s].*)?$").unwrap());
static YEAR_LAST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})[-/.](\d{1,2})[-/.](\d{4})(?:[T\s].*)?$").unwrap());

/// Parse a date of uncertain shape. Accepted:
///
/// - year-first (`2021-03-05`, also `/` or `.` separators), any
///   time-of-day suffix ignored;
/// - year-last (`03/28/2011`, `28.03.2011`), where the leading component
///   is tried as a month first and as a day second, so `04.03.2021` is
///   April 3rd while `28.03.2011` is March 28th.
///
/// Calendar-invalid dates and everything else come back as `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Some(caps) = YEAR_FIRST.captures(trimmed) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    if let Some(caps) = YEAR_LAST.captures(trimmed) {
        let first: u32 = caps[1].parse().ok()?;
        let second: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, first, second)
            .or_else(|| NaiveDate::from_ymd_opt(year, second, first));
    }
    None
}

/// Parse a monetary amount as an exact decimal. Only plain decimal
/// notation is accepted; thousands-separated strings, currency symbols
/// and blanks are `None`.
pub fn parse_amount(raw: &str) -> Option<BigDecimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    BigDecimal::from_str(trimmed).ok()
}

/// Trim a cell and treat the empty result as absent.
pub fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_parse_date_year_first() {
        assert_eq!(parse_date("2021-03-05"), Some(date(2021, 3, 5)));
        assert_eq!(parse_date("2021/3/5"), Some(date(2021, 3, 5)));
        assert_eq!(parse_date("2021.03.05"), Some(date(2021, 3, 5)));
        assert_eq!(parse_date(" 2021-03-05 00:00:00 "), Some(date(2021, 3, 5)));
        assert_eq!(parse_date("2021-03-05T12:30:00Z"), Some(date(2021, 3, 5)));
    }

    #[test]
    fn test_parse_date_year_last_month_first_then_day_first() {
        assert_eq!(parse_date("03/28/2011"), Some(date(2011, 3, 28)));
        // 28 is not a valid month, so the day-first reading applies.
        assert_eq!(parse_date("28.03.2011"), Some(date(2011, 3, 28)));
        // Ambiguous values resolve month-first.
        assert_eq!(parse_date("04.03.2021"), Some(date(2021, 4, 3)));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("N/A"), None);
        assert_eq!(parse_date("2021-02-30"), None);
        assert_eq!(parse_date("13.13.2021"), None);
        assert_eq!(parse_date("1.2.2020extra"), None);
        assert_eq!(parse_date("20210305"), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1000"), Some(BigDecimal::from(1000)));
        assert_eq!(
            parse_amount(" 1250000.50 "),
            BigDecimal::from_str("1250000.50").ok()
        );
        assert_eq!(parse_amount("-42"), Some(BigDecimal::from(-42)));
        assert_eq!(parse_amount("1,000"), None);
        assert_eq!(parse_amount("UZS 500"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  Acme Corp "), Some("Acme Corp".to_string()));
        assert_eq!(non_empty("   "), None);
        assert_eq!(non_empty(""), None);
    }
}
