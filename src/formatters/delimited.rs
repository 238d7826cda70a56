//! Human-readable delimited formatter
//!
//! Renders `time`, `lvl`, `msg` and then the context as `key="value"`
//! tokens joined by a delimiter byte (tab by default):
//!
//! ```text
//! time=2025-01-08T10:30:45Z	lvl=INF	msg="context1"	ip="0.0.0.0"
//! ```
//!
//! Quotes, backslashes and control characters in the message, keys and values
//! are backslash-escaped, so a record never spans more than one line.

use crate::core::formatter::{NEW_LINE, TIME_FORMAT};
use crate::core::{Formatter, Message, Result};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy)]
pub struct DelimitedFormatter {
    delimiter: u8,
}

impl DelimitedFormatter {
    pub const DEFAULT_DELIMITER: u8 = b'\t';

    pub fn new() -> Self {
        Self {
            delimiter: Self::DEFAULT_DELIMITER,
        }
    }

    /// Use a different separator between tokens
    ///
    /// # Example
    ///
    /// ```
    /// use rust_logx::formatters::DelimitedFormatter;
    ///
    /// let formatter = DelimitedFormatter::new().with_delimiter(b' ');
    /// assert_eq!(formatter.delimiter(), b' ');
    /// ```
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

impl Default for DelimitedFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `s` with control characters, quotes and backslashes escaped,
/// passing unescaped runs through in one piece
fn write_escaped(out: &mut dyn Write, s: &str) -> io::Result<()> {
    let mut start = 0;
    for (i, c) in s.char_indices() {
        let replacement = match c {
            '"' => "\\\"",
            '\\' => "\\\\",
            c if c.is_control() => "",
            _ => continue,
        };
        out.write_all(s[start..i].as_bytes())?;
        if replacement.is_empty() {
            write!(out, "{}", c.escape_default())?;
        } else {
            out.write_all(replacement.as_bytes())?;
        }
        start = i + c.len_utf8();
    }
    out.write_all(s[start..].as_bytes())
}

impl Formatter for DelimitedFormatter {
    fn encode(&self, out: &mut dyn Write, message: &Message) -> Result<()> {
        let d = [self.delimiter];

        write!(out, "time={}", message.timestamp().format(TIME_FORMAT))?;
        out.write_all(&d)?;
        write!(out, "lvl={}", message.level())?;
        out.write_all(&d)?;
        out.write_all(b"msg=\"")?;
        write_escaped(out, message.text())?;
        out.write_all(b"\"")?;

        for (key, value) in message.pairs() {
            out.write_all(&d)?;
            write_escaped(out, &key.coerce())?;
            out.write_all(b"=\"")?;
            write_escaped(out, &value.coerce())?;
            out.write_all(b"\"")?;
        }
        out.write_all(&[NEW_LINE])?;
        Ok(())
    }
}
