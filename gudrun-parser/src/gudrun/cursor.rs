//! Line cursor
//!
//! The whole source is decoded and split into lines before parsing starts. The cursor is
//! an index into that immutable line array: popping advances the index, peeking reads at
//! it. Consumption is one-way, mirroring the single pass the format was designed for.

use crate::gudrun::error::LineError;

/// Forward-only cursor over the physical lines of a source.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    /// Split `source` into lines (`\n` or `\r\n` terminated).
    pub fn new(source: &'a str) -> Self {
        Self::from_lines(source.lines().collect())
    }

    pub fn from_lines(lines: Vec<&'a str>) -> Self {
        Self { lines, pos: 0 }
    }

    /// Remove and return the next line.
    pub fn pop(&mut self) -> Result<&'a str, LineError> {
        self.next_line().ok_or(LineError::EndOfInput)
    }

    /// Remove and return the next line, if any.
    pub fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.pos).copied()?;
        self.pos += 1;
        Some(line)
    }

    /// The next line, without consuming it.
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Discard up to `n` lines.
    pub fn skip(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.lines.len());
    }

    /// Discard the next line if it is all whitespace. At most one line is consumed.
    pub fn skip_blank(&mut self) {
        if self.peek().is_some_and(is_blank) {
            self.pos += 1;
        }
    }

    /// Discard lines up to and including the first one satisfying `predicate`.
    pub fn skip_until(&mut self, predicate: impl Fn(&str) -> bool) -> Result<&'a str, LineError> {
        loop {
            let line = self.pop()?;
            if predicate(line) {
                return Ok(line);
            }
        }
    }

    /// Number of lines consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.lines.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.lines.len()
    }
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Records end on a line whose first character is `}`.
pub fn is_closing_brace(line: &str) -> bool {
    line.starts_with('}')
}
