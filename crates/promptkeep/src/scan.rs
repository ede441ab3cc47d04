//! Document scanning: walk the library tree and produce records.
//!
//! Two scans share the same walking discipline (sorted paths, glob
//! excludes, warn-and-continue on unreadable files):
//!
//! - [`scan_markdown`] reads `*.md` prompt docs, parses frontmatter, and
//!   builds [`ToolRecord`]s with content-derived fallbacks.
//! - [`scan_prompt_files`] reads `*.json` prompt specs, keeping malformed
//!   files as explicit entries so each consumer can decide whether a bad
//!   file is a warning (index build) or a finding (validation).
//!
//! One bad file never aborts a scan.

use anyhow::{bail, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use promptkeep_core::frontmatter;
use promptkeep_core::models::{fingerprint, PromptRecord, ToolRecord};

use crate::config::Config;

/// A markdown document projected into an index record.
#[derive(Debug, Clone)]
pub struct MarkdownDoc {
    pub record: ToolRecord,
    /// Whether the file carried a non-empty frontmatter block. Search
    /// only considers documents that do.
    pub has_frontmatter: bool,
}

/// A prompt spec JSON file, parsed or not.
#[derive(Debug, Clone)]
pub enum PromptEntry {
    Parsed(PromptFile),
    Malformed { path: PathBuf, error: String },
}

#[derive(Debug, Clone)]
pub struct PromptFile {
    pub path: PathBuf,
    pub data: serde_json::Value,
}

/// Scan the library for markdown prompt docs.
///
/// Paths are collected and sorted before reading so record order is a
/// stable traversal order. Unreadable files are skipped with a warning
/// on stderr. Category mismatches between frontmatter (or content) and
/// the directory layout are warnings, never errors.
pub fn scan_markdown(config: &Config) -> Result<Vec<MarkdownDoc>> {
    let root = &config.library.prompts_root;
    if !root.exists() {
        bail!("prompts directory not found: {}", root.display());
    }

    let exclude_set = build_globset(&config.scan.exclude_globs)?;
    let paths = collect_paths(root, "md", &exclude_set, &config.scan.index_name)?;

    let mut docs = Vec::new();
    for path in paths {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("WARN: Could not read {}: {}", path.display(), e);
                continue;
            }
        };

        let doc = frontmatter::parse(&content);
        let fm = &doc.frontmatter;

        // Category comes from the first path segment under the scan root;
        // files directly under the root are uncategorized.
        let category = first_segment(&path, root).unwrap_or_else(|| "uncategorized".to_string());

        let content_title = extract_title_from_content(&content);
        let content_category = extract_category_from_content(&content);

        if let Some(fm_category) = fm.get_str("category") {
            if fm_category != category {
                eprintln!(
                    "WARN: {} frontmatter category '{}' does not match directory '{}'",
                    path.display(),
                    fm_category,
                    category
                );
            }
        }
        if let Some(ref derived) = content_category {
            if *derived != category {
                eprintln!(
                    "WARN: {} content-derived category '{}' does not match directory '{}'",
                    path.display(),
                    derived,
                    category
                );
            }
        }

        let title = fm
            .get_str("title")
            .map(String::from)
            .or(content_title)
            .unwrap_or_default();

        // Tags may be written as a scalar; the record always carries a list.
        let tags = match fm.get("tags") {
            Some(frontmatter::Value::List(items)) => items.clone(),
            Some(frontmatter::Value::Scalar(tag)) => vec![tag.clone()],
            None if category != "uncategorized" => vec![category.clone()],
            None => Vec::new(),
        };

        docs.push(MarkdownDoc {
            record: ToolRecord {
                path: path.to_string_lossy().into_owned(),
                title,
                tags,
                category,
                last_updated: fm.get_str("last_updated").unwrap_or("").to_string(),
                author: fm.get_str("author").unwrap_or("").to_string(),
            },
            has_frontmatter: !fm.is_empty(),
        });
    }

    Ok(docs)
}

/// Scan the library for prompt spec JSON files, excluding the index
/// artifact itself.
pub fn scan_prompt_files(config: &Config) -> Result<Vec<PromptEntry>> {
    let root = &config.library.prompts_root;
    if !root.exists() {
        bail!("prompts directory not found: {}", root.display());
    }

    let exclude_set = build_globset(&config.scan.exclude_globs)?;
    let paths = collect_paths(root, "json", &exclude_set, &config.scan.index_name)?;

    let mut entries = Vec::new();
    for path in paths {
        let raw = match std::fs::read(&path) {
            Ok(raw) => raw,
            Err(e) => {
                entries.push(PromptEntry::Malformed {
                    path,
                    error: e.to_string(),
                });
                continue;
            }
        };
        match serde_json::from_slice::<serde_json::Value>(&raw) {
            Ok(data) => entries.push(PromptEntry::Parsed(PromptFile { path, data })),
            Err(e) => entries.push(PromptEntry::Malformed {
                path,
                error: e.to_string(),
            }),
        }
    }

    Ok(entries)
}

/// Project a prompt spec file into its index record.
pub fn prompt_record(file: &PromptFile) -> PromptRecord {
    let slug = file
        .path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    // For spec records the category is the immediate parent directory.
    let category = file
        .path
        .parent()
        .and_then(|p| p.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let field = |pointer: &str| {
        file.data
            .pointer(pointer)
            .and_then(|v| v.as_str())
            .map(String::from)
    };

    PromptRecord {
        slug,
        category,
        path: file.path.to_string_lossy().into_owned(),
        hash: fingerprint(&file.data),
        model: field("/target_model"),
        reasoning_effort: field("/parameters/reasoning_effort"),
        verbosity: field("/parameters/verbosity"),
    }
}

/// Walk `root` for files with `extension`, applying the exclude globs
/// against root-relative paths and skipping the index artifact by name.
/// Returned paths are sorted.
fn collect_paths(
    root: &Path,
    extension: &str,
    exclude_set: &GlobSet,
    index_name: &str,
) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        if entry.file_name().to_string_lossy() == index_name {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        if exclude_set.is_match(relative) {
            continue;
        }
        paths.push(path.to_path_buf());
    }
    paths.sort();
    Ok(paths)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

fn first_segment(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    if relative.components().count() < 2 {
        return None;
    }
    relative
        .components()
        .next()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
}

/// Fallback title for files without frontmatter: the first `#`/`##`
/// heading within the first five lines, with a trailing ` (About)` and
/// any ` Prompt` suffix stripped.
fn extract_title_from_content(content: &str) -> Option<String> {
    for line in content.lines().take(5) {
        let line = line.trim();
        if let Some(heading) = line.strip_prefix("## ").or_else(|| line.strip_prefix("# ")) {
            let mut title = heading.trim();
            if let Some(stripped) = title.strip_suffix(" (About)") {
                title = stripped.trim();
            }
            if let Some(idx) = title.find(" Prompt") {
                title = title[..idx].trim();
            }
            return Some(title.to_string());
        }
    }
    None
}

/// Fallback category: a `Category: ` line within the first ten lines,
/// lowercased.
fn extract_category_from_content(content: &str) -> Option<String> {
    for line in content.lines().take(10) {
        let line = line.trim();
        if let Some(category) = line.strip_prefix("Category: ") {
            return Some(category.trim().to_lowercase());
        }
    }
    None
}
