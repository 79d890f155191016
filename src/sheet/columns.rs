/// Resolve a logical field to a column index.
///
/// Candidates must be lower-cased and are tried in priority order against the
/// lower-cased headers: an exact match wins first; failing that, the first
/// header (in header order) containing any candidate as a substring wins.
/// No typo tolerance beyond containment.
pub fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    for candidate in candidates {
        if let Some(index) = lowered.iter().position(|header| header == candidate) {
            return Some(index);
        }
    }
    lowered
        .iter()
        .position(|header| candidates.iter().any(|candidate| header.contains(candidate)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_exact_match_any_position() {
        let candidates = &["sku", "item sku"];
        assert_eq!(find_column(&headers(&["SKU", "Name"]), candidates), Some(0));
        assert_eq!(find_column(&headers(&["Name", "SKU"]), candidates), Some(1));
        assert_eq!(
            find_column(&headers(&["Price", "Name", "sku"]), candidates),
            Some(2)
        );
    }

    #[test]
    fn test_exact_match_beats_substring() {
        // "Item SKU" contains "sku", but the exact "sku" header wins even
        // though it comes later.
        let found = find_column(&headers(&["Item SKU number", "sku"]), &["sku"]);
        assert_eq!(found, Some(1));
    }

    #[test]
    fn test_candidate_priority_order() {
        let found = find_column(
            &headers(&["item_sku", "sku"]),
            &["sku", "item sku", "item_sku"],
        );
        assert_eq!(found, Some(1));
    }

    #[test]
    fn test_substring_fallback_scans_header_order() {
        let found = find_column(
            &headers(&["Product Name", "Product Title"]),
            &["title", "name"],
        );
        assert_eq!(found, Some(0));
    }

    #[test]
    fn test_not_found() {
        assert_eq!(find_column(&headers(&["Price", "Qty"]), &["sku"]), None);
        assert_eq!(find_column(&[], &["sku"]), None);
    }
}
