//! Change-gate driver: `pk check`.
//!
//! Intended as a pre-commit hook. For every staged markdown file under
//! the configured prefix, the staged and last-committed snapshots are
//! fetched from git and fed through the freshness check in
//! [`promptkeep_core::gate`]. Failures are listed together with a
//! remediation footer; passes are only shown with `--verbose`.

use anyhow::Result;
use chrono::Utc;

use promptkeep_core::gate::check_freshness;

use crate::config::Config;
use crate::git;

/// CLI entry point for `pk check`.
pub fn run_check(config: &Config, verbose: bool) -> Result<i32> {
    let files = git::staged_markdown_files(&config.gate.prefix)?;

    if files.is_empty() {
        if verbose {
            println!("No modified prompt files found in staging area.");
        }
        return Ok(0);
    }

    let today = Utc::now().date_naive();
    let mut failed = 0usize;

    for path in &files {
        let staged = git::staged_content(path)?;
        let previous = git::head_content(path)?;
        let check = check_freshness(path, previous.as_deref(), staged.as_deref(), today);

        if verbose || !check.passed {
            let status = if check.passed { "✓" } else { "✗" };
            println!("{} {}", status, check.message);
        }
        if !check.passed {
            failed += 1;
        }
    }

    if failed > 0 {
        println!();
        println!("Pre-commit check failed!");
        println!();
        println!("To fix these issues:");
        println!("1. Update the last_updated field to today's date (YYYY-MM-DD)");
        println!("2. Add a changelog entry describing your changes");
        println!("3. Re-stage your files: git add <file>");
        return Ok(1);
    }

    if verbose {
        println!();
        println!(
            "✓ All {} modified prompt files passed last_updated check",
            files.len()
        );
    }
    Ok(0)
}
