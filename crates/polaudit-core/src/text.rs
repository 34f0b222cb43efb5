//! Text cleaning for extracted policy documents.

/// Prepare raw extracted text for chunking: unify line endings, join
/// words hyphenated across line breaks, strip trailing spaces, and
/// collapse runs of blank lines to a single paragraph break.
///
/// Quote validation deliberately runs against the raw text, not the
/// cleaned text, so cleaning artifacts can never mask a verbatim match.
pub fn clean_policy_text(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let dehyphenated = unified.replace("-\n", "");

    let mut out = String::with_capacity(dehyphenated.len());
    let mut blank_run = 0usize;
    for line in dehyphenated.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim_end().to_string()
}
