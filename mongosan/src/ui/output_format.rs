//! Helpers for the short status messages mongosan prints to stderr.

use owo_colors::OwoColorize;
use std::io::{self, Write};

pub fn print_info_message<W: Write>(
    writer: &mut W,
    message: &str,
    supports_color: bool,
) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{}", message.cyan())
    } else {
        writeln!(writer, "{}", message)
    }
}

pub fn print_success_message<W: Write>(
    writer: &mut W,
    message: &str,
    supports_color: bool,
) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{}", message.green())
    } else {
        writeln!(writer, "{}", message)
    }
}

pub fn print_warn_message<W: Write>(
    writer: &mut W,
    message: &str,
    supports_color: bool,
) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "Warning:".yellow().bold(), message.yellow())
    } else {
        writeln!(writer, "Warning: {}", message)
    }
}

pub fn print_error_message<W: Write>(
    writer: &mut W,
    message: &str,
    supports_color: bool,
) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "Error:".red().bold(), message.red())
    } else {
        writeln!(writer, "Error: {}", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_output_has_no_escape_codes() {
        let mut buf = Vec::new();
        print_warn_message(&mut buf, "careful", false).unwrap();
        print_error_message(&mut buf, "broken", false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Warning: careful\nError: broken\n");
    }

    #[test]
    fn colored_output_keeps_the_message() {
        let mut buf = Vec::new();
        print_info_message(&mut buf, "hello", true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("hello"));
        assert!(text.contains('\u{1b}'));
    }
}
