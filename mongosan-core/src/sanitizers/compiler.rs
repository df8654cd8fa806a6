//! compiler.rs - Builds the immutable `Policy` used by every sanitization call.
//!
//! A `Policy` bundles the replacement string, the dry-run switch and the
//! forbidden-character matcher selected from `allow_dots`. The two possible
//! matchers are compiled once and shared read-only; no state is mutated after
//! construction, so a `Policy` can be cloned freely and used from any thread.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

/// Replacement used when none is configured, or when the configured one is unusable.
pub const DEFAULT_REPLACEMENT: &str = "_";

/// Matches the operator prefix only. Selected when dotted paths are allowed.
static DOLLAR_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[$]").expect("static operator pattern must compile"));

/// Matches both the operator prefix and the path separator.
static DOLLAR_AND_DOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[$.]").expect("static operator pattern must compile"));

/// Picks the precompiled matcher for the given `allow_dots` setting.
fn select_matcher(allow_dots: bool) -> &'static Regex {
    if allow_dots {
        &DOLLAR_ONLY
    } else {
        &DOLLAR_AND_DOT
    }
}

/// Immutable sanitization settings, passed explicitly through every call.
///
/// Construct with [`Policy::new`] or start from [`Policy::default`] and use the
/// `with_*` builders. Every constructor validates the replacement against the
/// active forbidden set: a replacement containing a forbidden character would
/// make re-sanitizing non-idempotent, so it is replaced by
/// [`DEFAULT_REPLACEMENT`] and a warning is logged.
///
/// An empty replacement is accepted. Be aware that it can make two distinct
/// keys collapse into one (`a.b` and `a$b` both become `ab`); the entry
/// processed last wins and the other is dropped.
#[derive(Debug, Clone)]
pub struct Policy {
    replacement: String,
    dry_run: bool,
    allow_dots: bool,
    matcher: &'static Regex,
}

impl Default for Policy {
    fn default() -> Self {
        Self::new(DEFAULT_REPLACEMENT, false, false)
    }
}

impl PartialEq for Policy {
    fn eq(&self, other: &Self) -> bool {
        self.replacement == other.replacement
            && self.dry_run == other.dry_run
            && self.allow_dots == other.allow_dots
    }
}

impl Eq for Policy {}

impl Policy {
    pub fn new(replacement: impl Into<String>, dry_run: bool, allow_dots: bool) -> Self {
        let matcher = select_matcher(allow_dots);
        let replacement = validate_replacement(replacement.into(), matcher);
        debug!(
            "Policy built: replacement={:?}, dry_run={}, allow_dots={}",
            replacement, dry_run, allow_dots
        );
        Self {
            replacement,
            dry_run,
            allow_dots,
            matcher,
        }
    }

    /// Returns a copy of this policy with a different replacement string.
    #[must_use]
    pub fn with_replacement(self, replacement: impl Into<String>) -> Self {
        Self::new(replacement, self.dry_run, self.allow_dots)
    }

    #[must_use]
    pub fn with_dry_run(self, dry_run: bool) -> Self {
        Self::new(self.replacement, dry_run, self.allow_dots)
    }

    /// Switching `allow_dots` re-selects the matcher and re-validates the replacement.
    #[must_use]
    pub fn with_allow_dots(self, allow_dots: bool) -> Self {
        Self::new(self.replacement, self.dry_run, allow_dots)
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn allow_dots(&self) -> bool {
        self.allow_dots
    }

    /// True if `s` contains at least one forbidden character.
    pub fn is_match(&self, s: &str) -> bool {
        self.matcher.is_match(s)
    }

    /// Number of forbidden characters in `s`.
    pub fn count_matches(&self, s: &str) -> usize {
        self.matcher.find_iter(s).count()
    }

    /// Replaces every forbidden character in `s`, ignoring `dry_run`.
    ///
    /// The replacement is inserted literally: `$1` in a replacement string is
    /// not a capture-group reference.
    pub fn rewrite<'a>(&self, s: &'a str) -> Cow<'a, str> {
        self.matcher.replace_all(s, NoExpand(&self.replacement))
    }
}

fn validate_replacement(replacement: String, matcher: &Regex) -> String {
    if matcher.is_match(&replacement) {
        warn!(
            "Replacement {:?} contains a forbidden character; falling back to {:?}.",
            replacement, DEFAULT_REPLACEMENT
        );
        return DEFAULT_REPLACEMENT.to_string();
    }
    replacement
}
