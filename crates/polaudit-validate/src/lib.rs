//! Grounding validation of generated rules against the raw document.
//!
//! The model's output is untrusted: quotes may be paraphrased and codes
//! may be invented. Every rule is checked against the original, pre-clean
//! document text and given a disposition. Validation never edits a rule
//! and never aborts on a bad one; dropped and flagged rules stay in the
//! output so the report can surface them.

pub mod codes;
pub mod quote;

use polaudit_core::types::{AuditedRule, CheckResult, Disposition, Rule, RuleVerdict};

/// Validate a batch of rules against the raw (pre-clean) source text.
///
/// Disposition policy: a rule whose quote is not verbatim in the source is
/// dropped (the quote is its only evidence); a rule whose quote holds but
/// which cites codes absent from the source is flagged; a rule missing
/// required fields is skipped without being checked.
pub fn validate(rules: &[Rule], source_text: &str) -> Vec<AuditedRule> {
    let normalized_source = quote::normalize_whitespace(source_text);
    let audited: Vec<AuditedRule> = rules
        .iter()
        .map(|rule| AuditedRule {
            rule: rule.clone(),
            verdict: audit_rule(rule, source_text, &normalized_source),
        })
        .collect();

    let kept = audited.iter().filter(|a| a.verdict.disposition == Disposition::Keep).count();
    tracing::info!(
        total = audited.len(),
        kept,
        "grounding validation complete"
    );
    audited
}

fn audit_rule(rule: &Rule, source_text: &str, normalized_source: &str) -> RuleVerdict {
    let missing_fields = missing_fields(rule);
    if !missing_fields.is_empty() {
        let detail = format!("not checked: empty field(s) {}", missing_fields.join(", "));
        tracing::warn!(rule = %rule.rule_name, %detail, "skipping malformed rule");
        return RuleVerdict {
            quote_check: CheckResult::fail(detail.clone()),
            code_check: CheckResult::fail(detail),
            disposition: Disposition::Skip,
        };
    }

    let quote_check = if quote::quote_is_grounded(&rule.quote, normalized_source) {
        CheckResult::pass()
    } else {
        CheckResult::fail("quote does not appear verbatim in the source document")
    };

    let missing = codes::missing_codes(&[&rule.description, &rule.sql], source_text);
    let code_check = if missing.is_empty() {
        CheckResult::pass()
    } else {
        CheckResult::fail(format!("codes absent from the source: {}", missing.join(", ")))
    };

    let disposition = if !quote_check.passed {
        Disposition::Drop
    } else if !code_check.passed {
        Disposition::Flag
    } else {
        Disposition::Keep
    };

    if disposition != Disposition::Keep {
        tracing::warn!(rule = %rule.rule_name, ?disposition, "rule failed grounding");
    }

    RuleVerdict { quote_check, code_check, disposition }
}

fn missing_fields(rule: &Rule) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if rule.rule_name.trim().is_empty() {
        missing.push("rule_name");
    }
    if rule.quote.trim().is_empty() {
        missing.push("quote");
    }
    if rule.sql.trim().is_empty() {
        missing.push("sql");
    }
    missing
}
