//! Version-control collaborator for the change gate.
//!
//! Thin shell-outs to `git` plumbing. Content lookups distinguish
//! "missing at that revision" (`Ok(None)`) from "git itself failed"
//! (`Err`): `git show` exiting non-zero for a path means the file does
//! not exist in the index or at HEAD, which is normal for newly added
//! files.

use anyhow::{bail, Context, Result};
use std::process::Command;

/// List staged markdown files (added or modified) under `prefix`.
pub fn staged_markdown_files(prefix: &str) -> Result<Vec<String>> {
    let output = Command::new("git")
        .args(["diff", "--cached", "--name-only", "--diff-filter=AM"])
        .output()
        .with_context(|| "Failed to execute 'git diff'. Is git installed?")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("git diff failed: {}", stderr.trim());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout
        .lines()
        .filter(|line| line.starts_with(prefix) && line.ends_with(".md"))
        .map(String::from)
        .collect())
}

/// Staged (index) content of `path`, or `None` if not staged.
pub fn staged_content(path: &str) -> Result<Option<String>> {
    show(&format!(":{}", path))
}

/// Last-committed content of `path`, or `None` if absent at HEAD.
pub fn head_content(path: &str) -> Result<Option<String>> {
    show(&format!("HEAD:{}", path))
}

fn show(spec: &str) -> Result<Option<String>> {
    let output = Command::new("git")
        .args(["show", spec])
        .output()
        .with_context(|| "Failed to execute 'git show'. Is git installed?")?;

    if !output.status.success() {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
}
