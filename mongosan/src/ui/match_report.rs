//! Human-readable rendering of scan results.

use owo_colors::OwoColorize;
use std::io::{self, Write};

use mongosan_core::{MatchKind, MatchSummary, OperatorMatch};

fn kind_label(kind: MatchKind) -> &'static str {
    match kind {
        MatchKind::Key => "key",
        MatchKind::Value => "value",
    }
}

/// Prints one line per match followed by the totals.
pub fn print_matches<W: Write>(
    matches: &[OperatorMatch],
    summary: &MatchSummary,
    writer: &mut W,
    supports_color: bool,
) -> io::Result<()> {
    if matches.is_empty() {
        return writeln!(writer, "No operator characters found.");
    }

    for m in matches {
        let path = if m.path.is_empty() { "(root)" } else { m.path.as_str() };
        if supports_color {
            writeln!(
                writer,
                "{} [{}] {} -> {}",
                path.bold(),
                kind_label(m.kind),
                m.original.red(),
                m.sanitized.green()
            )?;
        } else {
            writeln!(
                writer,
                "{} [{}] {} -> {}",
                path,
                kind_label(m.kind),
                m.original,
                m.sanitized
            )?;
        }
    }

    writeln!(
        writer,
        "Summary: {} key(s), {} value(s), {} character(s) to neutralize.",
        summary.keys, summary.values, summary.occurrences
    )
}
