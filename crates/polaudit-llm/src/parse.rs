use polaudit_core::error::{Error, Result};
use polaudit_core::types::{Rule, RuleSet};

/// Decode the model's JSON body into a `RuleSet`.
///
/// The body is untrusted. A body that is not JSON, or has no `rules`
/// array, fails the whole generation. Individual rule entries that do not
/// match the schema are skipped and counted, never fatal.
pub fn parse_rules(raw: &str) -> Result<RuleSet> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| Error::Generation(format!("model returned unparsable JSON: {e}")))?;

    let policy_name = value
        .get("policy_name")
        .and_then(|v| v.as_str())
        .unwrap_or("Unnamed policy")
        .to_string();

    let entries = value
        .get("rules")
        .and_then(|v| v.as_array())
        .ok_or_else(|| Error::Generation("model output has no 'rules' array".to_string()))?;

    let mut rules = Vec::with_capacity(entries.len());
    let mut malformed = 0usize;
    for (i, entry) in entries.iter().enumerate() {
        match serde_json::from_value::<Rule>(entry.clone()) {
            Ok(rule) => rules.push(rule),
            Err(e) => {
                malformed += 1;
                tracing::warn!(index = i, error = %e, "skipping malformed rule entry");
            }
        }
    }

    tracing::info!(rules = rules.len(), malformed, "parsed model output");
    Ok(RuleSet { policy_name, rules, malformed })
}
