//! Procedure/diagnosis code extraction and presence checks.

use regex::Regex;
use std::sync::OnceLock;

/// CPT codes are five digits; HCPCS Level II codes are one letter (A-V)
/// followed by four digits.
fn code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b(?:\d{5}|[A-V]\d{4})\b").unwrap_or_else(|e| {
            // The pattern is a literal; a failure here is a programming error.
            panic!("invalid code pattern: {e}")
        })
    })
}

/// All code-shaped tokens in `text`, first occurrence order, deduplicated.
pub fn extract_codes(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for m in code_pattern().find_iter(text) {
        let code = m.as_str().to_string();
        if !seen.contains(&code) {
            seen.push(code);
        }
    }
    seen
}

/// Codes referenced by `texts` that never occur verbatim in the raw
/// source. A code the source does not contain is a hallucination even if
/// it is a plausible real-world code.
pub fn missing_codes(texts: &[&str], source_text: &str) -> Vec<String> {
    let mut missing = Vec::new();
    for text in texts {
        for code in extract_codes(text) {
            if !source_text.contains(&code) && !missing.contains(&code) {
                missing.push(code);
            }
        }
    }
    missing
}
