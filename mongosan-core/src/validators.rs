// File: mongosan-core/src/validators.rs
//! Structural validation applied before a tree reaches the engine.
//!
//! The engine recurses once per nesting level and does not limit depth on its
//! own. Callers handling attacker-controlled input can run
//! [`ensure_max_depth`] first; it walks the tree with an explicit stack so the
//! check itself cannot exhaust the call stack.
//!
//! License: MIT OR APACHE 2.0

use serde_json::Value;

use crate::errors::MongosanError;

/// Rejects `value` if containers are nested more than `max_depth` levels deep.
///
/// Depth counts containers only: a scalar root has depth 0, `{}` and `[]`
/// have depth 1 and `{"a": [1]}` has depth 2.
pub fn ensure_max_depth(value: &Value, max_depth: usize) -> Result<(), MongosanError> {
    let mut stack: Vec<(&Value, usize)> = vec![(value, 0)];

    while let Some((node, depth)) = stack.pop() {
        let children: Box<dyn Iterator<Item = &Value> + '_> = match node {
            Value::Object(map) => Box::new(map.values()),
            Value::Array(items) => Box::new(items.iter()),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => continue,
        };

        let depth = depth + 1;
        if depth > max_depth {
            return Err(MongosanError::DepthLimitExceeded { limit: max_depth });
        }
        stack.extend(children.map(|child| (child, depth)));
    }

    Ok(())
}
