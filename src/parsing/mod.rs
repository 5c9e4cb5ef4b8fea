//! Shared parsing utilities for all export formats.
//!
//! This module contains helpers used by more than one tokenizer in
//! [`parsers`](crate::parsers) to avoid code duplication.

pub mod clock;

pub use clock::{Meridiem, clock_time, time_label, to_24_hour};

/// Byte-order mark some desktop exports prepend to the file.
const BOM: char = '\u{feff}';

/// Strips a leading UTF-8 byte-order mark, if present.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

/// Iterates the lines of an export, trimmed of surrounding whitespace.
///
/// Handles both `\n` and `\r\n` line endings and ignores a leading BOM.
pub fn trimmed_lines(text: &str) -> impl Iterator<Item = &str> {
    strip_bom(text).lines().map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom("\u{feff}Date,User,Message"), "Date,User,Message");
        assert_eq!(strip_bom("plain"), "plain");
    }

    #[test]
    fn test_trimmed_lines_handles_crlf() {
        let lines: Vec<&str> = trimmed_lines("\u{feff} a \r\nb\r\n\r\n  c").collect();
        assert_eq!(lines, vec!["a", "b", "", "c"]);
    }
}
