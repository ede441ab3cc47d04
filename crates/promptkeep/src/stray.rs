//! Stray prompt spec detection: `pk stray`.
//!
//! Prompt specs belong under the library root. A JSON file at the repo
//! root that looks like a prompt spec (has both `target_model` and
//! `messages`) is a misplaced file, usually the result of saving a
//! template in the wrong directory. A leftover legacy `prompts_json/`
//! directory is flagged too.

use anyhow::Result;
use std::path::Path;
use walkdir::WalkDir;

/// CLI entry point for `pk stray`. Scans the current directory.
pub fn run_stray() -> Result<i32> {
    let errors = find_strays(Path::new("."))?;

    if errors.is_empty() {
        println!("No stray prompt specs detected.");
        return Ok(0);
    }
    for error in &errors {
        eprintln!("{}", error);
    }
    Ok(1)
}

/// Check the top level of `root` for misplaced prompt specs.
pub fn find_strays(root: &Path) -> Result<Vec<String>> {
    let mut errors = Vec::new();

    let mut json_paths = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some("json")
        {
            json_paths.push(entry.path().to_path_buf());
        }
    }
    json_paths.sort();

    for path in json_paths {
        // Unparseable root-level JSON is none of our business here.
        let Ok(raw) = std::fs::read(&path) else {
            continue;
        };
        let Ok(data) = serde_json::from_slice::<serde_json::Value>(&raw) else {
            continue;
        };
        if data.get("target_model").is_some() && data.get("messages").is_some() {
            errors.push(format!("Stray prompt spec at repo root: {}", path.display()));
        }
    }

    if root.join("prompts_json").exists() {
        errors.push("Legacy directory present: prompts_json (should be removed)".to_string());
    }

    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_clean_root_has_no_strays() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name":"x"}"#).unwrap();
        assert!(find_strays(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_prompt_like_json_at_root_is_flagged() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("oops.json"),
            r#"{"target_model":"m","messages":[]}"#,
        )
        .unwrap();
        let errors = find_strays(dir.path()).unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("oops.json"));
    }

    #[test]
    fn test_nested_specs_are_not_flagged() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("prompts/eng");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            nested.join("a.json"),
            r#"{"target_model":"m","messages":[]}"#,
        )
        .unwrap();
        assert!(find_strays(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_legacy_directory_is_flagged() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("prompts_json")).unwrap();
        let errors = find_strays(dir.path()).unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("prompts_json"));
    }
}
