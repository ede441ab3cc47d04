//! Tag and keyword search over prompt metadata.
//!
//! Filters the markdown scan by tags (any-match by default, all-match
//! with `--all-tags`) and a case-insensitive keyword over titles. Only
//! documents that actually carry frontmatter participate. Output is an
//! aligned table, or JSON with `--json`.

use anyhow::Result;
use serde::Serialize;

use crate::config::Config;
use crate::scan;

/// Filters for `pk search`. All empty means match everything.
#[derive(Debug, Default)]
pub struct SearchFilter {
    pub tags: Vec<String>,
    pub all_tags: bool,
    pub keyword: Option<String>,
    pub all: bool,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SearchHit {
    path: String,
    title: String,
    tags: Vec<String>,
    last_updated: String,
}

/// CLI entry point for `pk search`.
pub fn run_search(config: &Config, filter: &SearchFilter) -> Result<i32> {
    let docs = scan::scan_markdown(config)?;

    let hits: Vec<SearchHit> = docs
        .into_iter()
        .filter(|doc| doc.has_frontmatter)
        .map(|doc| SearchHit {
            path: doc.record.path,
            title: doc.record.title,
            tags: doc.record.tags,
            last_updated: doc.record.last_updated,
        })
        .filter(|hit| matches(hit, filter))
        .collect();

    if filter.json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(0);
    }

    if hits.is_empty() {
        println!("No prompts found matching criteria.");
        return Ok(0);
    }

    print_table(&hits);
    Ok(0)
}

fn matches(hit: &SearchHit, filter: &SearchFilter) -> bool {
    if filter.all {
        return true;
    }
    if let Some(keyword) = &filter.keyword {
        if !hit.title.to_lowercase().contains(&keyword.to_lowercase()) {
            return false;
        }
    }
    if !filter.tags.is_empty() {
        if filter.all_tags {
            return filter.tags.iter().all(|t| hit.tags.contains(t));
        }
        return filter.tags.iter().any(|t| hit.tags.contains(t));
    }
    true
}

fn print_table(hits: &[SearchHit]) {
    let width_path = hits.iter().map(|h| h.path.len()).max().unwrap_or(4);
    let width_title = hits.iter().map(|h| h.title.len()).max().unwrap_or(5);

    println!(
        "{:<width_path$}  {:<width_title$}  Tags",
        "Path", "Title"
    );
    println!("{}", "-".repeat(width_path + width_title + 8));
    for hit in hits {
        println!(
            "{:<width_path$}  {:<width_title$}  {}",
            hit.path,
            hit.title,
            hit.tags.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, tags: &[&str]) -> SearchHit {
        SearchHit {
            path: "p".into(),
            title: title.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            last_updated: String::new(),
        }
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let filter = SearchFilter {
            keyword: Some("review".into()),
            ..Default::default()
        };
        assert!(matches(&hit("Code Review", &[]), &filter));
        assert!(!matches(&hit("Deploy", &[]), &filter));
    }

    #[test]
    fn test_any_tag_matches_by_default() {
        let filter = SearchFilter {
            tags: vec!["a".into(), "b".into()],
            ..Default::default()
        };
        assert!(matches(&hit("T", &["b"]), &filter));
        assert!(!matches(&hit("T", &["c"]), &filter));
    }

    #[test]
    fn test_all_tags_requires_subset() {
        let filter = SearchFilter {
            tags: vec!["a".into(), "b".into()],
            all_tags: true,
            ..Default::default()
        };
        assert!(matches(&hit("T", &["a", "b", "c"]), &filter));
        assert!(!matches(&hit("T", &["a"]), &filter));
    }

    #[test]
    fn test_all_flag_ignores_other_filters() {
        let filter = SearchFilter {
            keyword: Some("zzz".into()),
            all: true,
            ..Default::default()
        };
        assert!(matches(&hit("T", &[]), &filter));
    }
}
