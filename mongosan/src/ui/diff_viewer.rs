//! Unified diff between the original and sanitized renderings of a document.

use diffy::{create_patch, Line as DiffLine};
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Writes the lines removed (red) and added (green) by sanitization.
pub fn print_diff<W: Write>(
    original: &str,
    sanitized: &str,
    writer: &mut W,
    supports_color: bool,
) -> io::Result<()> {
    let patch = create_patch(original, sanitized);
    let header = "--- Diff Analysis ---";
    if supports_color {
        writeln!(writer, "{}", header.yellow().bold())?;
    } else {
        writeln!(writer, "{}", header)?;
    }

    let mut changed = false;
    for hunk in patch.hunks() {
        for line_change in hunk.lines() {
            match line_change {
                DiffLine::Delete(s) => {
                    changed = true;
                    let line = format!("- {}", s.trim_end_matches('\n'));
                    if supports_color {
                        writeln!(writer, "{}", line.red())?;
                    } else {
                        writeln!(writer, "{}", line)?;
                    }
                }
                DiffLine::Insert(s) => {
                    changed = true;
                    let line = format!("+ {}", s.trim_end_matches('\n'));
                    if supports_color {
                        writeln!(writer, "{}", line.green())?;
                    } else {
                        writeln!(writer, "{}", line)?;
                    }
                }
                DiffLine::Context(s) => writeln!(writer, "  {}", s.trim_end_matches('\n'))?,
            }
        }
    }

    if !changed {
        writeln!(writer, "No changes detected.")?;
    }
    Ok(())
}
