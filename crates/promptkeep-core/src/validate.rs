//! Prompt spec schema validation.
//!
//! Checks a parsed prompt JSON against the fixed schema: required
//! top-level keys, required parameter fields, a non-empty message list,
//! and an optional semantic-version field. This is a minimal manual
//! validation, not a JSON-Schema engine; the schema is small and the
//! error messages matter more than generality.
//!
//! Pairing (the sibling-markdown rule) lives with the scanner, which owns
//! filesystem access — this module is pure.

use regex::Regex;
use serde_json::Value;

use crate::models::Issue;

/// Three dot-separated non-negative integers, optional `-pre` and
/// `+build` suffixes.
const SEMVER_PATTERN: &str = r"^\d+\.\d+\.\d+(-[0-9A-Za-z.-]+)?(\+[0-9A-Za-z.-]+)?$";

/// Validate one prompt spec, collecting every violated rule.
///
/// Returns an empty vec when the spec is well-formed. A spec missing any
/// of the required top-level keys yields a single issue naming all of
/// them and no further checks run, since the rest would only cascade.
pub fn validate_prompt(data: &Value, path: &str) -> Vec<Issue> {
    let mut issues = Vec::new();

    let missing: Vec<&str> = ["target_model", "parameters", "messages"]
        .into_iter()
        .filter(|key| data.get(key).is_none())
        .collect();
    if !missing.is_empty() {
        return vec![Issue::new(
            path,
            format!("missing keys: {}", missing.join(", ")),
        )];
    }

    if data["parameters"].get("reasoning_effort").is_none() {
        issues.push(Issue::new(path, "parameters.reasoning_effort missing"));
    }

    match data["messages"].as_array() {
        Some(messages) if !messages.is_empty() => {
            for (i, message) in messages.iter().enumerate() {
                let ok = message.is_object()
                    && message.get("role").is_some()
                    && message.get("content").is_some();
                if !ok {
                    issues.push(Issue::new(path, format!("message entry {} invalid", i)));
                }
            }
        }
        _ => issues.push(Issue::new(path, "messages must be a non-empty list")),
    }

    if let Some(version) = data.get("version") {
        let valid = version.as_str().is_some_and(is_semver);
        if !valid {
            issues.push(Issue::new(
                path,
                format!("version {} is not a valid semantic version", version),
            ));
        }
    }

    issues
}

fn is_semver(value: &str) -> bool {
    Regex::new(SEMVER_PATTERN)
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_spec() -> Value {
        json!({
            "target_model": "gpt-5",
            "parameters": {"reasoning_effort": "high", "verbosity": "low"},
            "messages": [{"role": "system", "content": "You are helpful."}]
        })
    }

    #[test]
    fn test_valid_spec_has_no_issues() {
        assert!(validate_prompt(&valid_spec(), "p.json").is_empty());
    }

    #[test]
    fn test_missing_top_level_keys_single_issue() {
        let issues = validate_prompt(&json!({"messages": []}), "p.json");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("target_model"));
        assert!(issues[0].message.contains("parameters"));
    }

    #[test]
    fn test_missing_reasoning_effort_exactly_one_issue() {
        let mut spec = valid_spec();
        spec["parameters"] = json!({"verbosity": "low"});
        let issues = validate_prompt(&spec, "p.json");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "parameters.reasoning_effort missing");
        assert_eq!(issues[0].path, "p.json");
    }

    #[test]
    fn test_verbosity_is_optional() {
        let mut spec = valid_spec();
        spec["parameters"] = json!({"reasoning_effort": "high"});
        assert!(validate_prompt(&spec, "p.json").is_empty());
    }

    #[test]
    fn test_empty_messages_rejected() {
        let mut spec = valid_spec();
        spec["messages"] = json!([]);
        let issues = validate_prompt(&spec, "p.json");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("non-empty"));
    }

    #[test]
    fn test_message_entry_missing_role() {
        let mut spec = valid_spec();
        spec["messages"] = json!([{"content": "hi"}]);
        let issues = validate_prompt(&spec, "p.json");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("entry 0"));
    }

    #[test]
    fn test_non_semver_version_exactly_one_issue() {
        let mut spec = valid_spec();
        spec["version"] = json!("v1");
        let issues = validate_prompt(&spec, "p.json");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("semantic version"));
    }

    #[test]
    fn test_semver_with_prerelease_and_build() {
        for v in ["1.0.0", "0.2.10", "1.0.0-alpha.1", "1.0.0+build.5", "1.0.0-rc.1+sha.abc"] {
            let mut spec = valid_spec();
            spec["version"] = json!(v);
            assert!(validate_prompt(&spec, "p.json").is_empty(), "rejected {}", v);
        }
    }

    #[test]
    fn test_non_string_version_rejected() {
        let mut spec = valid_spec();
        spec["version"] = json!(1);
        assert_eq!(validate_prompt(&spec, "p.json").len(), 1);
    }
}
