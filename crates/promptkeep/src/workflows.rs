//! CI workflow configuration lint: `pk workflows`.
//!
//! Checks the GitHub Actions workflows that gate pull requests:
//!
//! 1. Every job declares `timeout-minutes`.
//! 2. Every step with `continue-on-error` has an `id`, and a later step
//!    whose `if` condition checks `steps.<id>.outcome` — otherwise the
//!    soft failure silently becomes a hard pass.

use anyhow::{bail, Context, Result};
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const WORKFLOWS_DIR: &str = ".github/workflows";

/// CLI entry point for `pk workflows`.
pub fn run_workflows() -> Result<i32> {
    let dir = Path::new(WORKFLOWS_DIR);
    if !dir.exists() {
        bail!("workflow directory not found: {}", WORKFLOWS_DIR);
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| {
            matches!(
                p.extension().and_then(|e| e.to_str()),
                Some("yml") | Some("yaml")
            )
        })
        .collect();
    paths.sort();

    let mut issues = Vec::new();
    let count = paths.len();
    for path in paths {
        issues.extend(lint_workflow_file(&path)?);
    }

    if issues.is_empty() {
        println!("All {} workflow files passed validation", count);
        return Ok(0);
    }
    println!("Workflow validation failed:");
    for issue in &issues {
        eprintln!("  - {}", issue);
    }
    Ok(1)
}

fn lint_workflow_file(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read workflow file: {}", path.display()))?;
    let workflow: Value = match serde_yaml::from_str(&raw) {
        Ok(v) => v,
        Err(e) => return Ok(vec![format!("{}: YAML parse error: {}", path.display(), e)]),
    };
    Ok(lint_workflow(&workflow, &path.display().to_string()))
}

/// Lint one parsed workflow document.
pub fn lint_workflow(workflow: &Value, label: &str) -> Vec<String> {
    let mut issues = Vec::new();

    let Some(jobs) = workflow.get("jobs").and_then(Value::as_mapping) else {
        return issues;
    };

    for (job_name, job) in jobs {
        let job_name = job_name.as_str().unwrap_or("?");

        if job.get("timeout-minutes").is_none() {
            issues.push(format!(
                "{}: Job '{}' missing timeout-minutes",
                label, job_name
            ));
        }

        let steps: Vec<&Value> = job
            .get("steps")
            .and_then(Value::as_sequence)
            .map(|s| s.iter().collect())
            .unwrap_or_default();

        for (i, step) in steps.iter().enumerate() {
            if !truthy(step.get("continue-on-error")) {
                continue;
            }
            let step_name = step
                .get("name")
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| format!("step-{}", i));

            let Some(step_id) = step.get("id").and_then(Value::as_str) else {
                issues.push(format!(
                    "{}: Job '{}', step '{}' has continue-on-error but no id for outcome checking",
                    label, job_name, step_name
                ));
                continue;
            };

            let needle = format!("steps.{}.outcome", step_id);
            let checked = steps[i + 1..].iter().any(|later| {
                later
                    .get("if")
                    .and_then(Value::as_str)
                    .is_some_and(|cond| cond.contains(&needle))
            });
            if !checked {
                issues.push(format!(
                    "{}: Job '{}', step '{}' (id: {}) has continue-on-error but no subsequent step checks its outcome",
                    label, job_name, step_name, step_id
                ));
            }
        }
    }

    issues
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_job_without_timeout_flagged() {
        let wf = parse("jobs:\n  build:\n    steps: []\n");
        let issues = lint_workflow(&wf, "ci.yml");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("missing timeout-minutes"));
    }

    #[test]
    fn test_continue_on_error_without_id_flagged() {
        let wf = parse(
            "jobs:\n  build:\n    timeout-minutes: 10\n    steps:\n      - name: risky\n        continue-on-error: true\n",
        );
        let issues = lint_workflow(&wf, "ci.yml");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("no id"));
    }

    #[test]
    fn test_unchecked_outcome_flagged() {
        let wf = parse(
            "jobs:\n  build:\n    timeout-minutes: 10\n    steps:\n      - name: risky\n        id: risky\n        continue-on-error: true\n",
        );
        let issues = lint_workflow(&wf, "ci.yml");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("no subsequent step"));
    }

    #[test]
    fn test_checked_outcome_passes() {
        let wf = parse(
            "jobs:\n  build:\n    timeout-minutes: 10\n    steps:\n      - name: risky\n        id: risky\n        continue-on-error: true\n      - name: report\n        if: steps.risky.outcome == 'failure'\n",
        );
        assert!(lint_workflow(&wf, "ci.yml").is_empty());
    }
}
