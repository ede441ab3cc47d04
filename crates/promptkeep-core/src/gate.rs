//! Change-gate freshness checking.
//!
//! Encodes the pre-commit policy: any substantive body edit must be
//! accompanied by a `last_updated` bump to today's date, while
//! frontmatter-only or cosmetic edits do not force one. The caller
//! supplies both content snapshots (staged and last-committed), each
//! either present as text or absent; this module only decides.

use chrono::NaiveDate;

use crate::frontmatter;

/// Outcome of a freshness check for one candidate file.
#[derive(Debug, Clone)]
pub struct GateCheck {
    pub passed: bool,
    pub message: String,
}

impl GateCheck {
    fn pass(message: String) -> Self {
        Self {
            passed: true,
            message,
        }
    }

    fn fail(message: String) -> Self {
        Self {
            passed: false,
            message,
        }
    }
}

/// Check one file's `last_updated` field against its body changes.
///
/// - No staged content: hard failure, the candidate cannot be read.
/// - No previous content (new file): `last_updated` must be `today`.
/// - Bodies equal after frontmatter stripping: pass, no requirement.
/// - Bodies differ: `last_updated` must be `today`.
pub fn check_freshness(
    path: &str,
    previous: Option<&str>,
    staged: Option<&str>,
    today: NaiveDate,
) -> GateCheck {
    let Some(staged) = staged else {
        return GateCheck::fail(format!("Could not read staged content for {}", path));
    };

    let staged_doc = frontmatter::parse(staged);
    let last_updated = staged_doc.frontmatter.get_str("last_updated").unwrap_or("");
    let today = today.format("%Y-%m-%d").to_string();

    let Some(previous) = previous else {
        // New file: the date must be set now, not inherited from a template.
        if last_updated != today {
            return GateCheck::fail(format!(
                "New file {} must have last_updated set to today ({}). Found: {}",
                path, today, last_updated
            ));
        }
        return GateCheck::pass(format!("New file {} has correct last_updated date", path));
    };

    let previous_doc = frontmatter::parse(previous);
    if staged_doc.body.trim() == previous_doc.body.trim() {
        return GateCheck::pass(format!(
            "No body changes in {}, last_updated check skipped",
            path
        ));
    }

    if last_updated != today {
        return GateCheck::fail(format!(
            "Body content changed in {} but last_updated is not today's date. Expected: {}, Found: {}",
            path, today, last_updated
        ));
    }

    GateCheck::pass(format!(
        "Body changed in {} and last_updated is current ({})",
        path, today
    ))
}
