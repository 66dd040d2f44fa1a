/// Resolve a logical field to a column position by scanning `candidates`
/// in priority order and matching case-insensitively on substrings.
///
/// The first candidate that matches any header wins, so a high-priority
/// candidate beats an earlier column matched by a lower-priority one.
/// Returns `None` when no candidate matches; the caller decides whether
/// the field is skippable or gates the whole file.
pub fn resolve_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    for candidate in candidates {
        let needle = candidate.to_lowercase();
        for (index, header) in headers.iter().enumerate() {
            if header.to_lowercase().contains(&needle) {
                return Some(index);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_resolve_column_substring_case_insensitive() {
        let headers = headers(&["№", "NAME OF SUPPLIER (company)", "Contract amount"]);
        assert_eq!(resolve_column(&headers, &["Name of supplier"]), Some(1));
        assert_eq!(resolve_column(&headers, &["amount"]), Some(2));
    }

    #[test]
    fn test_resolve_column_candidate_priority_beats_column_order() {
        // "TIN" appears later in the table than a "pinfl" column, but it is
        // the higher-priority candidate and must win.
        let headers = headers(&["pinfl of applicant", "Vendor", "TIN"]);
        assert_eq!(resolve_column(&headers, &["STIR", "TIN", "ИНН", "pinfl"]), Some(2));
    }

    #[test]
    fn test_resolve_column_first_matching_header_wins() {
        let headers = headers(&["Amount (plan)", "Amount (fact)"]);
        assert_eq!(resolve_column(&headers, &["Amount"]), Some(0));
    }

    #[test]
    fn test_resolve_column_cyrillic() {
        let headers = headers(&["Товарлар va xizmatlar", "Ишлаб чиқарувчи корхона"]);
        assert_eq!(resolve_column(&headers, &["Name of supplier", "Ишлаб чиқарувчи"]), Some(1));
    }

    #[test]
    fn test_resolve_column_unresolved() {
        let headers = headers(&["№", "Region"]);
        assert_eq!(resolve_column(&headers, &["Currency"]), None);
        assert_eq!(resolve_column(&[], &["Currency"]), None);
    }
}
