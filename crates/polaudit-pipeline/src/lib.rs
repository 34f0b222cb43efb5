//! Single-document audit pipeline: clean -> chunk -> index -> retrieve ->
//! generate -> validate -> report.
//!
//! Each run owns its index exclusively and discards it at the end; runs
//! for different documents are fully independent. Document-level failures
//! surface as typed errors for the caller to report; they must never kill
//! a batch.

pub mod html;

use chrono::Utc;
use serde::Serialize;

use polaudit_core::chunker;
use polaudit_core::config::PipelineConfig;
use polaudit_core::error::{Error, Result};
use polaudit_core::text::clean_policy_text;
use polaudit_core::traits::{Embedder, Generator};
use polaudit_core::types::{AuditedRule, Disposition};
use polaudit_llm::{build_prompt, parse_rules};
use polaudit_rag::{retrieve, VectorIndex};
use polaudit_validate::validate;

/// Final audit output for one document. Every rule the model produced is
/// present with its verdict; nothing is silently omitted.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyReport {
    pub policy_name: String,
    /// blake3 hex digest of the raw document text.
    pub document_fingerprint: String,
    /// RFC 3339 UTC timestamp of report assembly.
    pub generated_at: String,
    pub chunk_count: usize,
    pub retrieved_chunks: usize,
    /// Rule entries the model emitted that did not match the schema.
    pub malformed_rules: usize,
    pub rules: Vec<AuditedRule>,
}

impl PolicyReport {
    pub fn count(&self, disposition: Disposition) -> usize {
        self.rules
            .iter()
            .filter(|r| r.verdict.disposition == disposition)
            .count()
    }

    pub fn kept(&self) -> impl Iterator<Item = &AuditedRule> {
        self.rules
            .iter()
            .filter(|r| r.verdict.disposition == Disposition::Keep)
    }
}

pub struct AuditPipeline {
    config: PipelineConfig,
    embedder: Box<dyn Embedder>,
    generator: Box<dyn Generator>,
}

impl AuditPipeline {
    /// All collaborators are handed in explicitly; the pipeline holds no
    /// process-wide state and reads no files.
    pub fn new(
        config: PipelineConfig,
        embedder: Box<dyn Embedder>,
        generator: Box<dyn Generator>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, embedder, generator })
    }

    /// Run the full audit for one document's raw text.
    ///
    /// Chunking and retrieval work on the cleaned text; grounding
    /// validation runs against `raw_text` so cleaning artifacts can never
    /// mask or fake a verbatim match.
    pub fn run(&self, raw_text: &str) -> Result<PolicyReport> {
        let cleaned = clean_policy_text(raw_text);
        let chunks = chunker::split(&cleaned, self.config.chunk_size, self.config.chunk_overlap);
        let chunk_count = chunks.len();
        tracing::info!(chunk_count, "document chunked");

        let index = VectorIndex::build(chunks, self.embedder.as_ref())?;
        let retrieval = retrieve(
            &index,
            self.embedder.as_ref(),
            &self.config.retrieval_query,
            self.config.top_k,
        )?;
        let retrieved_chunks = retrieval.len();

        let prompt = build_prompt(&retrieval.context());
        let body = self
            .generator
            .complete(&prompt)
            .map_err(|e| Error::Generation(e.to_string()))?;
        let rule_set = parse_rules(&body)?;

        let rules = validate(&rule_set.rules, raw_text);

        Ok(PolicyReport {
            policy_name: rule_set.policy_name,
            document_fingerprint: blake3::hash(raw_text.as_bytes()).to_hex().to_string(),
            generated_at: Utc::now().to_rfc3339(),
            chunk_count,
            retrieved_chunks,
            malformed_rules: rule_set.malformed,
            rules,
        })
    }
}
