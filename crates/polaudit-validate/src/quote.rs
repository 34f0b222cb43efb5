//! Verbatim quote verification.

/// Collapse every whitespace run to a single space, preserving word
/// boundaries. Line wrapping and indentation differences between the PDF
/// extraction and the model's quote must not defeat a verbatim match.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when `quote`, whitespace-normalized, appears as a substring of the
/// normalized source. Word-for-word: any altered, added or dropped word
/// fails, no matter how close the paraphrase.
pub fn quote_is_grounded(quote: &str, normalized_source: &str) -> bool {
    let q = normalize_whitespace(quote);
    if q.is_empty() {
        return false;
    }
    normalized_source.contains(&q)
}
