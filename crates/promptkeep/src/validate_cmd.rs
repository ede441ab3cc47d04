//! Schema and pairing validation driver.
//!
//! Aggregates every finding across the full scan — JSON parse errors,
//! schema violations, missing sibling docs — and reports them together.
//! Exit status is the merge gate: zero issues means zero.

use anyhow::Result;

use promptkeep_core::models::Issue;
use promptkeep_core::validate::validate_prompt;

use crate::config::Config;
use crate::scan;

/// CLI entry point for `pk validate`.
pub fn run_validate(config: &Config) -> Result<i32> {
    let issues = collect_issues(config)?;

    if issues.is_empty() {
        println!("Schema + pairing validation passed.");
        return Ok(0);
    }
    for issue in &issues {
        eprintln!("{}", issue);
    }
    Ok(1)
}

/// Validate every prompt spec under the library root.
pub fn collect_issues(config: &Config) -> Result<Vec<Issue>> {
    let mut issues = Vec::new();

    for entry in scan::scan_prompt_files(config)? {
        match entry {
            scan::PromptEntry::Malformed { path, error } => {
                issues.push(Issue::new(
                    path.to_string_lossy(),
                    format!("JSON parse error: {}", error),
                ));
            }
            scan::PromptEntry::Parsed(file) => {
                let label = file.path.to_string_lossy().into_owned();
                issues.extend(validate_prompt(&file.data, &label));

                // Pairing rule: every spec needs a markdown doc sibling.
                let sibling = file.path.with_extension("md");
                if !sibling.exists() {
                    let name = sibling
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    issues.push(Issue::new(label, format!("missing markdown doc {}", name)));
                }
            }
        }
    }

    Ok(issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn config_for(root: &Path) -> Config {
        let mut config = Config::default();
        config.library.prompts_root = root.to_path_buf();
        config
    }

    fn valid_spec() -> &'static str {
        r#"{"target_model":"gpt-5","parameters":{"reasoning_effort":"high"},"messages":[{"role":"user","content":"hi"}]}"#
    }

    #[test]
    fn test_paired_valid_spec_has_no_issues() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("prompts");
        fs::create_dir_all(root.join("eng")).unwrap();
        fs::write(root.join("eng/a.json"), valid_spec()).unwrap();
        fs::write(root.join("eng/a.md"), "---\ntitle: A\n---\nBody\n").unwrap();

        assert!(collect_issues(&config_for(&root)).unwrap().is_empty());
    }

    #[test]
    fn test_missing_sibling_is_exactly_one_issue() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("prompts");
        fs::create_dir_all(root.join("eng")).unwrap();
        fs::write(root.join("eng/a.json"), valid_spec()).unwrap();

        let issues = collect_issues(&config_for(&root)).unwrap();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("missing markdown doc a.md"));
    }

    #[test]
    fn test_parse_error_and_schema_issues_aggregate() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("prompts");
        fs::create_dir_all(root.join("eng")).unwrap();
        fs::write(root.join("eng/bad.json"), "{").unwrap();
        fs::write(root.join("eng/empty.json"), r#"{"messages":[]}"#).unwrap();
        fs::write(root.join("eng/empty.md"), "doc").unwrap();

        let issues = collect_issues(&config_for(&root)).unwrap();
        assert_eq!(issues.len(), 2);
        assert!(issues[0].message.contains("JSON parse error"));
        assert!(issues[1].message.contains("missing keys"));
    }
}
