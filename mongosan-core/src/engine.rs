// mongosan-core/src/engine.rs
//! Defines the core SanitizationEngine trait and its result type.
//!
//! The trait decouples callers (the request adapter, the CLI) from the
//! concrete traversal, so a different engine can be dropped in without
//! touching them.
//!
//! License: MIT OR APACHE 2.0

use serde_json::Value;

use crate::operator_match::OperatorMatch;
use crate::sanitizers::compiler::Policy;

/// Output of one engine invocation.
///
/// `modified` is true iff at least one forbidden character was found,
/// including under a dry run where `value` is returned unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizationResult {
    pub value: Value,
    pub modified: bool,
}

impl SanitizationResult {
    pub fn unchanged(value: Value) -> Self {
        Self {
            value,
            modified: false,
        }
    }
}

/// A trait that defines the core functionality of a sanitization engine.
///
/// Implementations must be pure: no state is carried between calls and the
/// input tree is never mutated.
pub trait SanitizationEngine: Send + Sync {
    /// Sanitizes `value` under the engine's policy and returns a fresh tree.
    fn sanitize_value(&self, value: &Value) -> SanitizationResult;

    /// Reports every key and string value that contains forbidden characters,
    /// in traversal order, without rewriting anything.
    fn find_matches(&self, value: &Value) -> Vec<OperatorMatch>;

    /// Returns the policy the engine applies.
    fn policy(&self) -> &Policy;
}
