use polaudit_core::error::Error;
use polaudit_core::types::{Classification, LogicConfidence};
use polaudit_llm::{build_prompt, parse_rules};

#[test]
fn prompt_carries_context_schema_and_guardrails() {
    let prompt = build_prompt("Physical therapy (97110) limited to 20 units per year.");
    assert!(prompt.contains("### POLICY TEXT:"));
    assert!(prompt.ends_with("Physical therapy (97110) limited to 20 units per year."));
    assert!(prompt.contains("Mutual Exclusion"));
    assert!(prompt.contains("Zero Tolerance for Hallucinations"));
    assert!(prompt.contains("ClaimLines"));
}

#[test]
fn well_formed_body_parses_every_rule() {
    let body = r#"{
        "policy_name": "Therapy Services Policy",
        "rules": [
            {
                "rule_name": "PT unit cap",
                "description": "Physical therapy (97110) capped at 20 units per year.",
                "sql": "SELECT PatientID FROM ClaimLines WHERE ProcedureCode = '97110' GROUP BY PatientID HAVING SUM(Units) > 20",
                "classification": "Overutilization",
                "logic_confidence": "High",
                "confidence_reasoning": "Aligned with CMS therapy caps.",
                "quote": "Physical therapy (97110) limited to 20 units per year."
            },
            {
                "rule_name": "E/M once daily",
                "description": "One E/M visit (99213) per patient per day.",
                "sql": "SELECT ClaimLineID FROM ClaimLines WHERE ProcedureCode = '99213'",
                "classification": "Mutual Exclusion",
                "logic_confidence": "Medium",
                "quote": "Only one E/M visit (99213) per patient per day."
            }
        ]
    }"#;
    let set = parse_rules(body).expect("parse");
    assert_eq!(set.policy_name, "Therapy Services Policy");
    assert_eq!(set.rules.len(), 2);
    assert_eq!(set.malformed, 0);
    assert_eq!(set.rules[0].classification, Classification::Overutilization);
    assert_eq!(set.rules[1].logic_confidence, LogicConfidence::Medium);
    assert_eq!(set.rules[1].confidence_reasoning, None);
}

#[test]
fn malformed_entries_are_skipped_not_fatal() {
    let body = r#"{
        "policy_name": "P",
        "rules": [
            { "rule_name": "missing everything" },
            {
                "rule_name": "ok",
                "description": "d",
                "sql": "SELECT 1",
                "classification": "Service Not Covered",
                "logic_confidence": "Low",
                "quote": "q"
            }
        ]
    }"#;
    let set = parse_rules(body).expect("parse");
    assert_eq!(set.rules.len(), 1);
    assert_eq!(set.malformed, 1);
    assert_eq!(set.rules[0].classification, Classification::ServiceNotCovered);
}

#[test]
fn non_json_body_is_a_generation_error() {
    match parse_rules("I could not find any rules, sorry!") {
        Err(Error::Generation(msg)) => assert!(msg.contains("unparsable")),
        other => panic!("expected Generation error, got {other:?}"),
    }
}

#[test]
fn missing_rules_array_is_a_generation_error() {
    match parse_rules(r#"{"policy_name": "P"}"#) {
        Err(Error::Generation(msg)) => assert!(msg.contains("rules")),
        other => panic!("expected Generation error, got {other:?}"),
    }
}

#[test]
fn missing_policy_name_falls_back() {
    let set = parse_rules(r#"{"rules": []}"#).expect("parse");
    assert_eq!(set.policy_name, "Unnamed policy");
    assert!(set.rules.is_empty());
}
