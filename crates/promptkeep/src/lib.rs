//! # Promptkeep
//!
//! **Maintenance toolkit for a prompt library.**
//!
//! Promptkeep keeps a directory of markdown prompt docs and JSON prompt
//! specs honest: it regenerates the committed index artifacts, validates
//! specs against the schema and pairing rules, searches prompt metadata,
//! and gates commits on `last_updated` freshness.
//!
//! ## Data Flow
//!
//! 1. The **scanner** ([`scan`]) walks the library and parses each file
//!    with the shared frontmatter parser from `promptkeep-core`.
//! 2. Records flow either to an **index builder** ([`index`]) that writes
//!    a deterministic JSON artifact, or to the **validator**
//!    ([`validate_cmd`]) that aggregates issues for a non-zero exit.
//! 3. The **change gate** ([`check`]) is an independent pipeline keyed off
//!    staged git content ([`git`]) rather than a directory walk.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration with drop-in defaults |
//! | [`scan`] | Directory walking, record projection, content fallbacks |
//! | [`index`] | Index artifact generation (`pk index`) |
//! | [`validate_cmd`] | Schema + pairing validation driver (`pk validate`) |
//! | [`search`] | Tag/keyword search over prompt metadata (`pk search`) |
//! | [`check`] | Pre-commit freshness gate (`pk check`) |
//! | [`git`] | Version-control collaborator: staged/HEAD content |
//! | [`stray`] | Misplaced prompt spec detection (`pk stray`) |
//! | [`workflows`] | CI workflow configuration lint (`pk workflows`) |

pub mod check;
pub mod config;
pub mod git;
pub mod index;
pub mod scan;
pub mod search;
pub mod stray;
pub mod validate_cmd;
pub mod workflows;

pub use config::{load_config, Config};
