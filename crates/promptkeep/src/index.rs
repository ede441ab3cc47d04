//! Index artifact generation.
//!
//! Runs a full scan and writes a single JSON artifact per target. The
//! artifact is built entirely in memory and written once, so an
//! interrupted run never leaves a partially written index. Output is
//! minified and stably ordered: two runs over an unchanged file set are
//! byte-identical except for the `generated_at` timestamp in the tools
//! index, which makes the artifacts diff-friendly change indicators.

use anyhow::{bail, Context, Result};
use chrono::Utc;

use promptkeep_core::models::{PromptIndex, ToolIndex};

use crate::config::Config;
use crate::scan;

/// CLI entry point for `pk index <target>`.
pub fn run_index(config: &Config, target: &str) -> Result<i32> {
    match target {
        "prompts" => build_prompt_index(config)?,
        "tools" => build_tool_index(config)?,
        "all" => {
            build_prompt_index(config)?;
            build_tool_index(config)?;
        }
        _ => bail!("Unknown index target: '{}'. Available: prompts, tools, all", target),
    }
    Ok(0)
}

/// Build `<prompts_root>/index.json` from the prompt spec JSON files.
///
/// Malformed specs are skipped with a warning; the index always reflects
/// every parseable file.
pub fn build_prompt_index(config: &Config) -> Result<()> {
    let entries = scan::scan_prompt_files(config)?;

    let mut records = Vec::new();
    for entry in entries {
        match entry {
            scan::PromptEntry::Parsed(file) => records.push(scan::prompt_record(&file)),
            scan::PromptEntry::Malformed { path, error } => {
                eprintln!("WARN: skip {}: {}", path.display(), error);
            }
        }
    }

    let count = records.len();
    let index = PromptIndex { prompts: records };
    let mut out = serde_json::to_string(&index)?;
    out.push('\n');

    let index_path = config.library.prompts_root.join(&config.scan.index_name);
    std::fs::write(&index_path, out)
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    println!("Wrote {} with {} entries", index_path.display(), count);
    Ok(())
}

/// Build `<tools_dir>/index.json` from the markdown prompt docs.
pub fn build_tool_index(config: &Config) -> Result<()> {
    let docs = scan::scan_markdown(config)?;
    let records: Vec<_> = docs.into_iter().map(|d| d.record).collect();
    let count = records.len();

    let index = ToolIndex {
        generated_at: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        prompts: records,
    };
    let out = serde_json::to_string(&index)?;

    let tools_dir = &config.library.tools_dir;
    std::fs::create_dir_all(tools_dir)
        .with_context(|| format!("Failed to create {}", tools_dir.display()))?;
    let index_path = tools_dir.join(&config.scan.index_name);
    std::fs::write(&index_path, out)
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    println!("Wrote {} with {} entries", index_path.display(), count);
    Ok(())
}
