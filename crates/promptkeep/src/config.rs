//! TOML configuration loading.
//!
//! All paths and scan settings come from a single TOML file (default:
//! `./pk.toml`). Every field has a default matching the conventional
//! library layout, and a missing config file is not an error — the tool
//! is a drop-in for repos that never configure anything.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub gate: GateConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LibraryConfig {
    /// Root of the prompt library (markdown docs + JSON specs).
    #[serde(default = "default_prompts_root")]
    pub prompts_root: PathBuf,
    /// Directory receiving the markdown index artifact.
    #[serde(default = "default_tools_dir")]
    pub tools_dir: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            prompts_root: default_prompts_root(),
            tools_dir: default_tools_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScanConfig {
    /// Glob patterns excluded from markdown scans.
    #[serde(default = "default_exclude_globs")]
    pub exclude_globs: Vec<String>,
    /// Filename of the index artifacts; skipped during scans to avoid
    /// indexing the index.
    #[serde(default = "default_index_name")]
    pub index_name: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude_globs: default_exclude_globs(),
            index_name: default_index_name(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GateConfig {
    /// Path prefix restricting which staged files the gate examines.
    #[serde(default = "default_gate_prefix")]
    pub prefix: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            prefix: default_gate_prefix(),
        }
    }
}

fn default_prompts_root() -> PathBuf {
    PathBuf::from("prompts")
}
fn default_tools_dir() -> PathBuf {
    PathBuf::from("tools")
}
fn default_exclude_globs() -> Vec<String> {
    vec!["**/templates/**".to_string()]
}
fn default_index_name() -> String {
    "index.json".to_string()
}
fn default_gate_prefix() -> String {
    "prompts/".to_string()
}

/// Load configuration from `path`, falling back to defaults when the
/// file does not exist. A present-but-malformed file is an error.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config(Path::new("/nonexistent/pk.toml")).unwrap();
        assert_eq!(config.library.prompts_root, PathBuf::from("prompts"));
        assert_eq!(config.scan.index_name, "index.json");
        assert_eq!(config.gate.prefix, "prompts/");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str("[library]\nprompts_root = \"lib\"\n").unwrap();
        assert_eq!(config.library.prompts_root, PathBuf::from("lib"));
        assert_eq!(config.library.tools_dir, PathBuf::from("tools"));
        assert_eq!(config.scan.exclude_globs, vec!["**/templates/**"]);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pk.toml");
        std::fs::write(&path, "[library\n").unwrap();
        assert!(load_config(&path).is_err());
    }
}
