//! Domain types shared by the chunking, retrieval, generation and
//! validation crates.

use serde::{Deserialize, Serialize};

/// A contiguous segment of the cleaned policy text.
///
/// - `content`: verbatim slice of the cleaned text (neighbors may overlap)
/// - `offset`: char offset of `content` within the cleaned text
/// - `chunk_index`/`total_chunks`: position within the document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,
    pub offset: usize,
    pub chunk_index: usize,
    pub total_chunks: usize,
}

/// A chunk paired with its similarity score for one query.
/// Higher is always better.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub score: f32,
    pub chunk: Chunk,
}

/// Rule category, as emitted by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "Mutual Exclusion", alias = "MutualExclusion")]
    MutualExclusion,
    #[serde(rename = "Overutilization")]
    Overutilization,
    #[serde(rename = "Service Not Covered", alias = "ServiceNotCovered")]
    ServiceNotCovered,
}

/// Model's self-reported confidence in the generated SQL logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicConfidence {
    High,
    Medium,
    Low,
}

/// One adjudication rule extracted by the model. Untrusted until it has
/// passed grounding validation against the raw document text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub rule_name: String,
    pub description: String,
    pub sql: String,
    pub classification: Classification,
    pub logic_confidence: LogicConfidence,
    #[serde(default)]
    pub confidence_reasoning: Option<String>,
    pub quote: String,
}

/// The model's full answer for one document, after lenient parsing.
/// `malformed` counts rule entries that failed to deserialize and were
/// skipped.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub policy_name: String,
    pub rules: Vec<Rule>,
    pub malformed: usize,
}

/// Outcome of a single grounding check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub passed: bool,
    pub detail: Option<String>,
}

impl CheckResult {
    pub fn pass() -> Self {
        Self { passed: true, detail: None }
    }

    pub fn fail(detail: impl Into<String>) -> Self {
        Self { passed: false, detail: Some(detail.into()) }
    }
}

/// What happens to a rule after validation.
///
/// `Drop`: the quote is not grounded in the source, the rule is excluded
/// from use but still reported. `Flag`: the quote is grounded but the rule
/// cites codes absent from the source. `Skip`: the rule was malformed and
/// never checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Disposition {
    Keep,
    Flag,
    Drop,
    Skip,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleVerdict {
    pub quote_check: CheckResult,
    pub code_check: CheckResult,
    pub disposition: Disposition,
}

/// A rule together with its validation verdict. Rules are never edited by
/// validation; `rule` is exactly what the model produced.
#[derive(Debug, Clone, Serialize)]
pub struct AuditedRule {
    pub rule: Rule,
    pub verdict: RuleVerdict,
}
