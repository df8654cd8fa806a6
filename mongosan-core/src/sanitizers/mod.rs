//! Character-level sanitization for mongosan.
//!
//! `compiler` turns settings into an immutable [`Policy`](compiler::Policy);
//! `string` applies a policy to a single key or string value. The recursive
//! tree walk lives in `engines`.

pub mod compiler;
pub mod string;
