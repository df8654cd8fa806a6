// mongosan-core/src/operator_match.rs
//! Data structures for reporting where operator characters were found.
//!
//! A scan produces one [`OperatorMatch`] per offending key or string value,
//! addressed by a JSON Pointer (RFC 6901) into the original document.

use serde::{Deserialize, Serialize};

/// Whether the match was found in an object key or in a string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Key,
    Value,
}

/// A single key or string value containing forbidden characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorMatch {
    /// JSON Pointer to the entry in the input. For a key match this points at
    /// the entry the key belongs to.
    pub path: String,
    pub kind: MatchKind,
    pub original: String,
    /// What the string becomes once sanitized, even when the scan ran as a dry run.
    pub sanitized: String,
    /// Number of forbidden characters in `original`.
    pub occurrences: usize,
}

/// Totals over a list of matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub keys: usize,
    pub values: usize,
    pub occurrences: usize,
}

impl MatchSummary {
    pub fn is_empty(&self) -> bool {
        self.keys == 0 && self.values == 0
    }
}

pub fn summarize_matches(matches: &[OperatorMatch]) -> MatchSummary {
    matches.iter().fold(MatchSummary::default(), |mut acc, m| {
        match m.kind {
            MatchKind::Key => acc.keys += 1,
            MatchKind::Value => acc.values += 1,
        }
        acc.occurrences += m.occurrences;
        acc
    })
}

/// Appends one reference token to a JSON Pointer, escaping `~` and `/`.
pub fn push_pointer_segment(pointer: &str, segment: &str) -> String {
    let escaped = segment.replace('~', "~0").replace('/', "~1");
    format!("{}/{}", pointer, escaped)
}
