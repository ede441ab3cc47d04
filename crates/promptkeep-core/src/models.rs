//! Record types for the index artifacts and validation reports.
//!
//! Field order on the serde structs is the wire order of the generated
//! JSON, so it must stay stable: the index files are committed to version
//! control and diffed, and a field reshuffle would show up as churn.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Hex length of the truncated content fingerprint.
const FINGERPRINT_LEN: usize = 12;

/// Index entry for a prompt spec JSON file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PromptRecord {
    pub slug: String,
    pub category: String,
    pub path: String,
    pub hash: String,
    pub model: Option<String>,
    pub reasoning_effort: Option<String>,
    pub verbosity: Option<String>,
}

/// Index entry for a markdown prompt document.
///
/// Absent metadata is substituted with defaults (empty string, empty
/// list) rather than omitted, so every entry has the same shape.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ToolRecord {
    pub path: String,
    pub title: String,
    pub tags: Vec<String>,
    pub category: String,
    pub last_updated: String,
    pub author: String,
}

/// Artifact written to `<prompts_root>/index.json`.
#[derive(Debug, Clone, Serialize)]
pub struct PromptIndex {
    pub prompts: Vec<PromptRecord>,
}

/// Artifact written to `<tools_dir>/index.json`.
///
/// `generated_at` is the only field allowed to differ between two runs
/// over an unchanged file set.
#[derive(Debug, Clone, Serialize)]
pub struct ToolIndex {
    pub generated_at: String,
    pub prompts: Vec<ToolRecord>,
}

/// One validation finding: which file, and what is wrong with it.
///
/// Issues accumulate across a full scan; nothing short-circuits on the
/// first failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: String,
    pub message: String,
}

impl Issue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Short content fingerprint for change detection.
///
/// SHA-256 over the canonical serialization of the parsed JSON value,
/// truncated to 12 hex chars. `serde_json` keeps object keys sorted, so
/// the fingerprint is independent of key order in the source file.
pub fn fingerprint(data: &serde_json::Value) -> String {
    let canonical = data.to_string();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let hex = format!("{:x}", hasher.finalize());
    hex[..FINGERPRINT_LEN].to_string()
}
