//! HTML rendering of a `PolicyReport`.
//!
//! Dropped and flagged rules get their own visible sections with the
//! check details; a reader can always see what the validator removed and
//! why.

use polaudit_core::types::{AuditedRule, Classification, Disposition, LogicConfidence};

use crate::PolicyReport;

pub fn render_report(report: &PolicyReport) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{} audit report</title>\n", escape(&report.policy_name)));
    out.push_str(STYLE);
    out.push_str("</head>\n<body>\n");

    out.push_str(&format!("<h1>{}</h1>\n", escape(&report.policy_name)));
    out.push_str(&format!(
        "<p class=\"meta\">document {} · generated {}</p>\n",
        escape(&report.document_fingerprint),
        escape(&report.generated_at)
    ));
    out.push_str(&format!(
        "<p class=\"meta\">{} chunks indexed, {} retrieved · rules: {} kept, {} flagged, {} dropped, {} skipped, {} malformed</p>\n",
        report.chunk_count,
        report.retrieved_chunks,
        report.count(Disposition::Keep),
        report.count(Disposition::Flag),
        report.count(Disposition::Drop),
        report.count(Disposition::Skip),
        report.malformed_rules
    ));

    section(&mut out, report, Disposition::Keep, "Verified rules");
    section(&mut out, report, Disposition::Flag, "Flagged rules (hallucinated codes)");
    section(&mut out, report, Disposition::Drop, "Dropped rules (quote not in source)");
    section(&mut out, report, Disposition::Skip, "Skipped rules (malformed)");

    out.push_str("</body>\n</html>\n");
    out
}

fn section(out: &mut String, report: &PolicyReport, disposition: Disposition, title: &str) {
    let rules: Vec<&AuditedRule> = report
        .rules
        .iter()
        .filter(|r| r.verdict.disposition == disposition)
        .collect();
    if rules.is_empty() {
        return;
    }
    out.push_str(&format!("<h2>{}</h2>\n", escape(title)));
    for audited in rules {
        let rule = &audited.rule;
        out.push_str("<div class=\"rule\">\n");
        out.push_str(&format!(
            "<h3>{} <span class=\"tag\">{}</span> <span class=\"tag\">{} confidence</span></h3>\n",
            escape(&rule.rule_name),
            classification_label(rule.classification),
            confidence_label(rule.logic_confidence)
        ));
        out.push_str(&format!("<p>{}</p>\n", escape(&rule.description)));
        out.push_str(&format!("<blockquote>{}</blockquote>\n", escape(&rule.quote)));
        out.push_str(&format!("<pre>{}</pre>\n", escape(&rule.sql)));
        if let Some(reasoning) = &rule.confidence_reasoning {
            out.push_str(&format!("<p class=\"meta\">{}</p>\n", escape(reasoning)));
        }
        for (name, check) in [
            ("quote check", &audited.verdict.quote_check),
            ("code check", &audited.verdict.code_check),
        ] {
            if let Some(detail) = &check.detail {
                out.push_str(&format!(
                    "<p class=\"defect\">{}: {}</p>\n",
                    escape(name),
                    escape(detail)
                ));
            }
        }
        out.push_str("</div>\n");
    }
}

fn classification_label(c: Classification) -> &'static str {
    match c {
        Classification::MutualExclusion => "Mutual Exclusion",
        Classification::Overutilization => "Overutilization",
        Classification::ServiceNotCovered => "Service Not Covered",
    }
}

fn confidence_label(c: LogicConfidence) -> &'static str {
    match c {
        LogicConfidence::High => "High",
        LogicConfidence::Medium => "Medium",
        LogicConfidence::Low => "Low",
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const STYLE: &str = "<style>\n\
    body { font-family: sans-serif; margin: 2rem auto; max-width: 60rem; }\n\
    .meta { color: #555; }\n\
    .tag { font-size: 0.75rem; background: #eee; border-radius: 4px; padding: 2px 6px; }\n\
    .rule { border: 1px solid #ddd; border-radius: 6px; padding: 1rem; margin: 1rem 0; }\n\
    .defect { color: #a40000; }\n\
    blockquote { border-left: 3px solid #999; margin: 0.5rem 0; padding-left: 0.75rem; }\n\
    pre { background: #f7f7f7; padding: 0.75rem; overflow-x: auto; }\n\
    </style>\n";
