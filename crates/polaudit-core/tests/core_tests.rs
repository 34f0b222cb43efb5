use polaudit_core::config::PipelineConfig;
use polaudit_core::error::Error;
use polaudit_core::text::clean_policy_text;
use polaudit_core::types::{Classification, Rule};

#[test]
fn clean_joins_hyphenated_line_breaks() {
    let raw = "Prior authori-\nzation is required for code 97110.";
    let cleaned = clean_policy_text(raw);
    assert!(cleaned.contains("authorization"), "cleaned: {cleaned}");
}

#[test]
fn clean_collapses_blank_runs_and_crlf() {
    let raw = "Section 1\r\n\r\n\r\n\r\nSection 2\r\n";
    let cleaned = clean_policy_text(raw);
    assert_eq!(cleaned, "Section 1\n\nSection 2");
}

#[test]
fn default_pipeline_config_is_valid() {
    let config = PipelineConfig::default();
    config.validate().expect("defaults validate");
    assert_eq!(config.chunk_size, 1000);
    assert_eq!(config.chunk_overlap, 150);
    assert_eq!(config.top_k, 5);
    assert_eq!(config.retrieval_query, "billing rules and medical policy restrictions");
}

#[test]
fn overlap_must_be_smaller_than_chunk_size() {
    let config = PipelineConfig { chunk_size: 100, chunk_overlap: 100, ..Default::default() };
    match config.validate() {
        Err(Error::InvalidConfig(msg)) => assert!(msg.contains("chunk_overlap")),
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn rule_json_round_trips_model_classification_labels() {
    let json = r#"{
        "rule_name": "One E/M per day",
        "description": "Only one evaluation visit (99213) may be billed per patient per day.",
        "sql": "SELECT ClaimLineID FROM ClaimLines WHERE ProcedureCode = '99213'",
        "classification": "Mutual Exclusion",
        "logic_confidence": "High",
        "quote": "Only one E/M visit (99213) per patient per day."
    }"#;
    let rule: Rule = serde_json::from_str(json).expect("rule parses");
    assert_eq!(rule.classification, Classification::MutualExclusion);
    assert!(rule.confidence_reasoning.is_none());
}
