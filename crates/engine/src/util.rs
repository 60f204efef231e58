//! Internal helpers for input normalization and text matching.
//!
//! These utilities are **not** part of the public API.

/// Upper bound of ids bound into a single `IN (...)` list.
pub(crate) const IN_LIST_CHUNK: usize = 500;

/// Trim a name, returning `None` when nothing is left.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Lowercased search text, folded the same way as [`contains_folded`].
pub(crate) fn fold(needle: &str) -> String {
    needle.to_lowercase()
}

/// Whether `haystack` contains the already folded `needle`, ignoring case.
///
/// Folding is Unicode aware: `CAFFÈ` contains `caffè`. SQLite `LOWER` and
/// `LIKE` only fold ASCII, so matching happens here instead of in SQL.
pub(crate) fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank("  Food "), Some("Food".to_string()));
        assert_eq!(non_blank("   "), None);
        assert_eq!(non_blank(""), None);
    }

    #[test]
    fn matching_ignores_case_beyond_ascii() {
        assert!(contains_folded("Rent", &fold("RENT")));
        assert!(contains_folded("CAFFÈ al bar", &fold("caffè")));
        assert!(contains_folded("Élettricità", &fold("ÉLETTRICITÀ")));
        assert!(contains_folded("50% off", &fold("%")));
        assert!(contains_folded("anything", &fold("")));
        assert!(!contains_folded("Rent", &fold("rant")));
    }
}
