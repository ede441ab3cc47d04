//! # Promptkeep CLI (`pk`)
//!
//! The `pk` binary is the maintenance interface for a prompt library.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pk index <target>` | Regenerate the `prompts`, `tools`, or `all` index artifacts |
//! | `pk validate` | Validate prompt specs against the schema and pairing rules |
//! | `pk search` | Tag / keyword search over prompt metadata |
//! | `pk check` | Pre-commit gate: body edits require a `last_updated` bump |
//! | `pk stray` | Detect misplaced prompt specs at the repo root |
//! | `pk workflows` | Lint CI workflow configuration |
//!
//! Exit code 0 means success; 1 means a validation or check failure, or a
//! missing required directory.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use promptkeep::config::load_config;
use promptkeep::search::SearchFilter;
use promptkeep::{check, index, search, stray, validate_cmd, workflows};

/// Promptkeep — maintenance toolkit for a prompt library.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file; a missing file means built-in defaults.
#[derive(Parser)]
#[command(
    name = "pk",
    about = "Promptkeep — index, validate, search, and gate a prompt library",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./pk.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Regenerate index artifacts.
    ///
    /// `prompts` rebuilds `<prompts_root>/index.json` from the spec JSON
    /// files, `tools` rebuilds `<tools_dir>/index.json` from the markdown
    /// docs, `all` rebuilds both. Artifacts are regenerated from scratch
    /// each run, never patched.
    Index {
        /// Index target: `prompts`, `tools`, or `all`.
        target: String,
    },

    /// Validate prompt specs: schema fields, semver, markdown pairing.
    ///
    /// Every violation across the full scan is reported together; any
    /// issue makes the exit code non-zero so this can gate merges.
    Validate,

    /// Search prompt metadata by tags and title keyword.
    Search {
        /// Match prompts carrying any of these tags.
        #[arg(long, num_args = 0..)]
        tags: Vec<String>,

        /// Require all provided tags to match.
        #[arg(long)]
        all_tags: bool,

        /// Filter by keyword in title (case-insensitive).
        #[arg(long)]
        keyword: Option<String>,

        /// Return all prompts, ignoring other filters.
        #[arg(long)]
        all: bool,

        /// Output JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Check staged prompt docs for `last_updated` freshness.
    ///
    /// Intended as a pre-commit hook: a body edit without a current
    /// `last_updated` date fails the check.
    Check {
        /// Show detailed output for all files checked.
        #[arg(long, short)]
        verbose: bool,
    },

    /// Detect stray prompt specs outside canonical locations.
    Stray,

    /// Lint CI workflow configuration (timeouts, continue-on-error).
    Workflows,
}

fn main() {
    let cli = Cli::parse();

    let result = load_config(&cli.config).and_then(|config| match cli.command {
        Commands::Index { target } => index::run_index(&config, &target),
        Commands::Validate => validate_cmd::run_validate(&config),
        Commands::Search {
            tags,
            all_tags,
            keyword,
            all,
            json,
        } => search::run_search(
            &config,
            &SearchFilter {
                tags,
                all_tags,
                keyword,
                all,
                json,
            },
        ),
        Commands::Check { verbose } => check::run_check(&config, verbose),
        Commands::Stray => stray::run_stray(),
        Commands::Workflows => workflows::run_workflows(),
    });

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
