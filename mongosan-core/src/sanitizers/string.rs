//! String sanitizer: the leaf operation applied to every key and string value.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;

use crate::sanitizers::compiler::Policy;

/// Sanitizes a single string under `policy`.
///
/// Returns the (possibly rewritten) string and whether a forbidden character
/// was found. Under `dry_run` the original string is returned even when the
/// flag is `true`. No allocation happens unless a rewrite is materialized.
pub fn sanitize_str<'a>(s: &'a str, policy: &Policy) -> (Cow<'a, str>, bool) {
    if !policy.is_match(s) {
        return (Cow::Borrowed(s), false);
    }
    if policy.dry_run() {
        return (Cow::Borrowed(s), true);
    }
    (policy.rewrite(s), true)
}
