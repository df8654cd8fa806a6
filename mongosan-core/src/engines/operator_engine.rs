// mongosan-core/src/engines/operator_engine.rs
//! A `SanitizationEngine` implementation that neutralizes query-operator
//! characters in every key and string value of a JSON tree.
//! License: MIT OR APACHE 2.0

use log::debug;
use serde_json::{Map, Value};

use crate::engine::{SanitizationEngine, SanitizationResult};
use crate::operator_match::{push_pointer_segment, MatchKind, OperatorMatch};
use crate::sanitizers::compiler::Policy;
use crate::sanitizers::string::sanitize_str;

/// Recursively sanitizes `value` under `policy`.
///
/// The output is built fresh while walking, so the caller's tree is never
/// touched. Objects are rebuilt in insertion order; when two keys sanitize to
/// the same string the entry processed last wins. Arrays keep their length
/// and order. Numbers, booleans and null pass through unflagged.
pub fn sanitize_value(value: &Value, policy: &Policy) -> SanitizationResult {
    match value {
        Value::String(s) => {
            let (out, modified) = sanitize_str(s, policy);
            SanitizationResult {
                value: Value::String(out.into_owned()),
                modified,
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {
            SanitizationResult::unchanged(value.clone())
        }
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            let mut modified = false;
            for (key, child) in map {
                let (key, key_modified) = sanitize_str(key, policy);
                let child = sanitize_value(child, policy);
                modified |= key_modified || child.modified;
                if let Some(_overwritten) = out.insert(key.into_owned(), child.value) {
                    debug!("Sanitized keys collided; the later entry replaced the earlier one.");
                }
            }
            SanitizationResult {
                value: Value::Object(out),
                modified,
            }
        }
        Value::Array(items) => {
            let mut modified = false;
            let out = items
                .iter()
                .map(|item| {
                    let item = sanitize_value(item, policy);
                    modified |= item.modified;
                    item.value
                })
                .collect();
            SanitizationResult {
                value: Value::Array(out),
                modified,
            }
        }
    }
}

fn collect_matches(value: &Value, pointer: &str, policy: &Policy, out: &mut Vec<OperatorMatch>) {
    match value {
        Value::String(s) => push_match(s, pointer, MatchKind::Value, policy, out),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
        Value::Object(map) => {
            for (key, child) in map {
                let child_pointer = push_pointer_segment(pointer, key);
                push_match(key, &child_pointer, MatchKind::Key, policy, out);
                collect_matches(child, &child_pointer, policy, out);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let child_pointer = push_pointer_segment(pointer, &index.to_string());
                collect_matches(item, &child_pointer, policy, out);
            }
        }
    }
}

fn push_match(
    s: &str,
    pointer: &str,
    kind: MatchKind,
    policy: &Policy,
    out: &mut Vec<OperatorMatch>,
) {
    let occurrences = policy.count_matches(s);
    if occurrences == 0 {
        return;
    }
    out.push(OperatorMatch {
        path: pointer.to_string(),
        kind,
        original: s.to_string(),
        sanitized: policy.rewrite(s).into_owned(),
        occurrences,
    });
}

/// The default engine: a thin owner of a [`Policy`].
#[derive(Debug, Clone, Default)]
pub struct OperatorEngine {
    policy: Policy,
}

impl OperatorEngine {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }
}

impl SanitizationEngine for OperatorEngine {
    fn sanitize_value(&self, value: &Value) -> SanitizationResult {
        sanitize_value(value, &self.policy)
    }

    fn find_matches(&self, value: &Value) -> Vec<OperatorMatch> {
        let mut matches = Vec::new();
        collect_matches(value, "", &self.policy, &mut matches);
        debug!("Scan found {} operator match(es).", matches.len());
        matches
    }

    fn policy(&self) -> &Policy {
        &self.policy
    }
}
