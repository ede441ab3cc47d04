//! Lenient frontmatter parser.
//!
//! Parses the YAML-like metadata block at the top of a markdown document
//! into an insertion-ordered mapping plus the remaining body text. The
//! grammar is deliberately small and deliberately forgiving:
//!
//! - `key: value` lines start a new key. Paired single or double quotes
//!   around the value are stripped. A `[a, b, c]` value becomes a list of
//!   trimmed, unquoted items.
//! - A line starting with `- ` that is not itself a key line appends an
//!   item to the most recently seen key, turning it into a list.
//! - Blank lines and `#` comments inside the block are ignored.
//! - Anything else is silently skipped.
//!
//! Malformed lines are never an error: the library tolerates hand-edited
//! metadata, so the parser favors availability over strictness. Do not
//! tighten this into a real YAML parser.
//!
//! # Example
//!
//! ```rust
//! use promptkeep_core::frontmatter::{parse, Value};
//!
//! let doc = parse("---\ntitle: Hello\ntags: [a, b]\n---\nBody text.\n");
//! assert_eq!(doc.frontmatter.get_str("title"), Some("Hello"));
//! assert_eq!(doc.body, "Body text.");
//! ```

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A single frontmatter value: either a scalar string or a list of strings.
///
/// Lists arise only from the explicit bracket or dash-continuation syntax;
/// a scalar is never reinterpreted as a list after the fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::Scalar(_) => None,
            Value::List(items) => Some(items),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Scalar(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Insertion-ordered frontmatter mapping.
///
/// Key order is preserved as first-seen so downstream serialization is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: Vec<(String, Value)>,
}

impl Frontmatter {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Scalar value for `key`, or `None` if absent or a list.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// List value for `key`, or `None` if absent or a scalar.
    pub fn get_list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(Value::as_list)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Set `key` to `value`, replacing any existing value in place.
    fn set(&mut self, key: &str, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// Append a continuation item to `key`'s list, resetting the value to
    /// an empty list first if it was absent or a scalar.
    fn push_item(&mut self, key: &str, item: String) {
        let needs_reset = !matches!(self.get(key), Some(Value::List(_)));
        if needs_reset {
            self.set(key, Value::List(Vec::new()));
        }
        if let Some((_, Value::List(items))) = self.entries.iter_mut().find(|(k, _)| k == key) {
            items.push(item);
        }
    }
}

impl Serialize for Frontmatter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A parsed document: frontmatter mapping plus body text.
#[derive(Debug, Clone)]
pub struct Document {
    pub frontmatter: Frontmatter,
    pub body: String,
}

/// Parse frontmatter out of raw document text.
///
/// The metadata block is the text between a leading `---` line and the
/// next `---` line. If the text does not start with the delimiter, or the
/// closing delimiter is missing, the frontmatter is empty and the body is
/// the original text unchanged. Otherwise the body is the remainder after
/// the closing delimiter, whitespace-trimmed.
pub fn parse(text: &str) -> Document {
    let without_frontmatter = || Document {
        frontmatter: Frontmatter::default(),
        body: text.to_string(),
    };

    let Some(rest) = text.strip_prefix("---\n") else {
        return without_frontmatter();
    };
    let Some(end) = rest.find("\n---\n").map(|pos| (pos, 5)).or_else(|| {
        // Closing delimiter at end-of-input without a trailing newline.
        rest.strip_suffix("\n---")
            .map(|block| (block.len(), 4))
    }) else {
        return without_frontmatter();
    };
    let (block_end, delim_len) = end;

    let block = &rest[..block_end];
    let body = rest[block_end + delim_len..].trim().to_string();

    let mut fm = Frontmatter::default();
    let mut current_key: Option<String> = None;

    for line in block.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some((key, raw_value)) = split_key_line(line) {
            let value = parse_value(raw_value);
            fm.set(key, value);
            current_key = Some(key.to_string());
        } else if let Some(item) = continuation_item(line) {
            if let Some(key) = &current_key {
                fm.push_item(key, unquote(item).to_string());
            }
        }
        // Anything else: malformed line, skipped on purpose.
    }

    Document {
        frontmatter: fm,
        body,
    }
}

/// Split a `key: value` line, where the key is a run of `[A-Za-z0-9_]`
/// starting at column zero. Returns the key and the trimmed raw value.
fn split_key_line(line: &str) -> Option<(&str, &str)> {
    let colon = line.find(':')?;
    let key = &line[..colon];
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some((key, line[colon + 1..].trim()))
}

/// Match a `- item` continuation line (optional leading whitespace, a dash,
/// then at least one whitespace character). Returns the trimmed item text.
fn continuation_item(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('-')?;
    if !rest.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }
    Some(rest.trim())
}

/// Parse a raw scalar value: bracket lists split on commas with empty items
/// dropped, quoted scalars unquoted.
fn parse_value(raw: &str) -> Value {
    if let Some(inner) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        let items = inner
            .split(',')
            .map(|item| unquote(item.trim()).to_string())
            .filter(|item| !item.is_empty())
            .collect();
        Value::List(items)
    } else {
        Value::Scalar(unquote(raw).to_string())
    }
}

/// Strip one pair of matching single or double quotes, if present.
fn unquote(s: &str) -> &str {
    if s.len() >= 2 {
        let bytes = s.as_bytes();
        if (bytes[0] == b'"' && bytes[s.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[s.len() - 1] == b'\'')
        {
            return &s[1..s.len() - 1];
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_delimiter_returns_original_text() {
        let text = "# Just a heading\n\nSome body.\n";
        let doc = parse(text);
        assert!(doc.frontmatter.is_empty());
        assert_eq!(doc.body, text);
    }

    #[test]
    fn test_unclosed_block_returns_original_text() {
        let text = "---\ntitle: Dangling\n\nNo closing fence.";
        let doc = parse(text);
        assert!(doc.frontmatter.is_empty());
        assert_eq!(doc.body, text);
    }

    #[test]
    fn test_basic_scalars_and_body_trim() {
        let doc = parse("---\ntitle: Code Review\nauthor: \"Jo\"\n---\n\nBody here.\n");
        assert_eq!(doc.frontmatter.get_str("title"), Some("Code Review"));
        assert_eq!(doc.frontmatter.get_str("author"), Some("Jo"));
        assert_eq!(doc.body, "Body here.");
    }

    #[test]
    fn test_single_quoted_scalar() {
        let doc = parse("---\ntitle: 'Quoted'\n---\nx");
        assert_eq!(doc.frontmatter.get_str("title"), Some("Quoted"));
    }

    #[test]
    fn test_bracket_list() {
        let doc = parse("---\ntags: [\"a\", b, 'c']\n---\nx");
        assert_eq!(
            doc.frontmatter.get_list("tags"),
            Some(&["a".to_string(), "b".to_string(), "c".to_string()][..])
        );
    }

    #[test]
    fn test_empty_bracket_list() {
        let doc = parse("---\ntags: []\n---\nx");
        assert_eq!(doc.frontmatter.get_list("tags"), Some(&[][..]));
    }

    #[test]
    fn test_dash_continuation_matches_bracket_form() {
        let bracket = parse("---\ntags: [a, b, c]\n---\nx");
        let dashes = parse("---\ntags:\n  - a\n  - b\n  - c\n---\nx");
        assert_eq!(
            bracket.frontmatter.get_list("tags"),
            dashes.frontmatter.get_list("tags")
        );
        assert_eq!(
            dashes.frontmatter.get_list("tags"),
            Some(&["a".to_string(), "b".to_string(), "c".to_string()][..])
        );
    }

    #[test]
    fn test_dash_after_scalar_resets_to_list() {
        let doc = parse("---\ntags: oops\n  - real\n---\nx");
        assert_eq!(doc.frontmatter.get_list("tags"), Some(&["real".to_string()][..]));
    }

    #[test]
    fn test_comments_blanks_and_malformed_lines_skipped() {
        let doc = parse("---\n# a comment\n\ntitle: Ok\nthis line has no colon\n---\nx");
        assert_eq!(doc.frontmatter.len(), 1);
        assert_eq!(doc.frontmatter.get_str("title"), Some("Ok"));
    }

    #[test]
    fn test_key_order_preserved_in_serialization() {
        let doc = parse("---\nzeta: 1\nalpha: 2\ntags: [x]\n---\nx");
        let json = serde_json::to_string(&doc.frontmatter).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":"2","tags":["x"]}"#);
    }

    #[test]
    fn test_scalar_and_list_typing_survive_round_trip() {
        let doc = parse("---\ntitle: T\ntags: [a, b]\n---\nx");
        let json = serde_json::to_value(&doc.frontmatter).unwrap();
        assert!(json["title"].is_string());
        assert!(json["tags"].is_array());
    }

    #[test]
    fn test_closing_delimiter_at_end_of_input() {
        let doc = parse("---\ntitle: T\n---");
        assert_eq!(doc.frontmatter.get_str("title"), Some("T"));
        assert_eq!(doc.body, "");
    }
}
