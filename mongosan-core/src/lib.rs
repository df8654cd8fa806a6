// mongosan-core/src/lib.rs
//! # Mongosan Core Library
//!
//! `mongosan-core` neutralizes the characters that carry operator semantics in
//! document-query languages (`$`, and `.` unless dotted paths are allowed) in
//! arbitrary JSON trees, so untrusted input can no longer smuggle `$where`,
//! `$gt` or dotted paths into a query built from it.
//!
//! The library is pure and stateless: every call takes a borrowed tree and a
//! policy and returns a fresh tree plus a flag telling whether anything had to
//! be rewritten.
//!
//! ## Modules
//!
//! * `sanitizers`: the immutable [`Policy`] and the per-string sanitizer.
//! * `engine`: the [`SanitizationEngine`] trait and [`SanitizationResult`].
//! * `engines`: the recursive [`OperatorEngine`].
//! * `headless`: one-shot [`sanitize`] and [`has`] helpers.
//! * `operator_match`: scan reports ([`OperatorMatch`], [`MatchSummary`]).
//! * `validators`: the optional depth guard.
//! * `config`: [`SanitizeOptions`] and file loading.
//! * `request`: the adapter that sanitizes body, query, params and headers.
//! * `errors`: [`MongosanError`].
//!
//! ## Usage Example
//!
//! ```rust
//! use mongosan_core::{has, sanitize, SanitizeOptions};
//! use serde_json::json;
//!
//! let input = json!({ "$where": "1==1", "a.b": 5 });
//! assert!(has(&input, false));
//!
//! let clean = sanitize(&input, &SanitizeOptions::default());
//! assert_eq!(clean, json!({ "_where": "1==1", "a_b": 5 }));
//! ```
//!
//! ## Key collisions
//!
//! With an empty `replace_with`, two distinct keys can sanitize to the same
//! key (`a.b` and `a$b` both become `ab`). The entry processed last wins and
//! the other is silently dropped. Callers choosing an empty replacement accept
//! this behavior.
//!
//! ## Error Handling
//!
//! Sanitization itself cannot fail. Configuration loading, the depth guard
//! and the request adapter return [`MongosanError`].
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod operator_match;
pub mod request;
pub mod sanitizers;
pub mod validators;

/// Re-exports the public configuration types.
pub use config::SanitizeOptions;

/// Re-exports the custom error type for clear error reporting.
pub use errors::MongosanError;

/// Re-exports types related to the core sanitization engine trait.
pub use engine::{SanitizationEngine, SanitizationResult};

/// Re-exports the concrete engine and its free-function form.
pub use engines::operator_engine::{sanitize_value, OperatorEngine};

/// Re-exports the policy and the leaf sanitizer.
pub use sanitizers::compiler::{Policy, DEFAULT_REPLACEMENT};
pub use sanitizers::string::sanitize_str;

/// Re-exports types for scan reports.
pub use operator_match::{summarize_matches, MatchKind, MatchSummary, OperatorMatch};

/// Re-exports the one-shot helpers.
pub use headless::{has, sanitize, sanitize_checked};

/// Re-exports the request adapter.
pub use request::{JsonRequest, RequestField, RequestLike, RequestSanitizer, SanitizeCallback};

pub use validators::ensure_max_depth;
