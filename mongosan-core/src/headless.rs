// File: mongosan-core/src/headless.rs

//! `headless.rs`
//! One-shot convenience wrappers around the default engine.
//!
//! `sanitize` and `has` are total: they never fail and ignore
//! `SanitizeOptions::max_depth`. `sanitize_checked` applies the depth guard
//! first and is the entry point for untrusted, arbitrarily nested input.

use serde_json::Value;

use crate::config::SanitizeOptions;
use crate::engine::{SanitizationEngine, SanitizationResult};
use crate::engines::operator_engine::OperatorEngine;
use crate::errors::MongosanError;
use crate::sanitizers::compiler::Policy;
use crate::validators::ensure_max_depth;

/// Sanitizes `value` with a policy built from `options` and returns only the
/// sanitized tree.
///
/// # Arguments
///
/// * `value` - The tree to sanitize. It is not modified.
/// * `options` - `replace_with`, `dry_run` and `allow_dots` are honored.
pub fn sanitize(value: &Value, options: &SanitizeOptions) -> Value {
    OperatorEngine::new(options.to_policy()).sanitize_value(value).value
}

/// Returns true if `value` contains any forbidden character in a key or
/// string value. Runs as a dry run; nothing is rewritten.
pub fn has(value: &Value, allow_dots: bool) -> bool {
    let policy = Policy::default().with_allow_dots(allow_dots).with_dry_run(true);
    OperatorEngine::new(policy).sanitize_value(value).modified
}

/// Runs the depth guard when `options.max_depth` is set, then the engine.
pub fn sanitize_checked(
    value: &Value,
    options: &SanitizeOptions,
) -> Result<SanitizationResult, MongosanError> {
    if let Some(limit) = options.max_depth {
        ensure_max_depth(value, limit)?;
    }
    Ok(OperatorEngine::new(options.to_policy()).sanitize_value(value))
}
