//! # Promptkeep Core
//!
//! Shared logic for Promptkeep: the frontmatter parser, prompt schema
//! validation, change-gate freshness checking, and the record types that
//! flow into the index artifacts.
//!
//! This crate performs no filesystem or process I/O. Everything here is a
//! pure function over text or parsed JSON, which keeps the index builder,
//! the validator, and the pre-commit gate on one shared contract instead
//! of three drifting copies of the same parser.

pub mod frontmatter;
pub mod gate;
pub mod models;
pub mod validate;

pub use frontmatter::{Document, Frontmatter, Value};
pub use models::{Issue, PromptIndex, PromptRecord, ToolIndex, ToolRecord};
