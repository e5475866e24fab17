//! Field tokenizer.
//!
//! A line is split on single space bytes into [`Field`] spans. Spans index
//! into the caller's buffer; no text is copied.
//!
//! ```text
//! move D1.0 S5.0
//! ^^^^ ^^^^ ^^^^
//!  0    1    2
//! ```

use heapless::Vec;

/// Field separator.
const SEPARATOR: u8 = b' ';

/// A span of one field within a line buffer.
///
/// Only meaningful together with the line it was produced from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    pub start: usize,
    pub len: usize,
}

impl Field {
    #[must_use]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Borrow the bytes of this field from `line`.
    ///
    /// Returns an empty slice if the span does not fit in `line`.
    #[inline]
    #[must_use]
    pub fn slice<'l>(&self, line: &'l [u8]) -> &'l [u8] {
        line.get(self.start..self.start + self.len).unwrap_or(&[])
    }

    /// Index one past the last byte of the field.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Error type for bounded tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TokenizeError {
    /// The line holds more fields than the output can store.
    TooManyFields,
}

impl core::fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooManyFields => write!(f, "too many fields"),
        }
    }
}

/// Iterator over the fields of a line. Created by [`fields`].
#[derive(Clone, Debug)]
pub struct Fields<'l> {
    line: &'l [u8],
    pos: usize,
}

impl Iterator for Fields<'_> {
    type Item = Field;

    fn next(&mut self) -> Option<Field> {
        let line = self.line;

        while self.pos < line.len() && line[self.pos] == SEPARATOR {
            self.pos += 1;
        }
        if self.pos >= line.len() {
            return None;
        }

        let start = self.pos;
        while self.pos < line.len() && line[self.pos] != SEPARATOR {
            self.pos += 1;
        }

        Some(Field::new(start, self.pos - start))
    }
}

/// Iterate over the space-separated fields of `line`.
///
/// Runs of separators (leading, repeated or trailing) never yield empty
/// fields, and the end of the line always closes the last field.
///
/// # Example
///
/// ```
/// use linecmd_proto::{fields, Field};
///
/// let mut it = fields(b"pump V1.25 MD");
/// assert_eq!(it.next(), Some(Field::new(0, 4)));
/// assert_eq!(it.next(), Some(Field::new(5, 5)));
/// assert_eq!(it.next(), Some(Field::new(11, 2)));
/// assert_eq!(it.next(), None);
/// ```
#[inline]
pub fn fields(line: &[u8]) -> Fields<'_> {
    Fields { line, pos: 0 }
}

/// Collect the fields of `line` into a bounded vector.
///
/// An empty result means the line carries no command; that is not an error.
///
/// # Errors
///
/// Returns [`TokenizeError::TooManyFields`] if the line has more than `N`
/// fields.
pub fn tokenize<const N: usize>(line: &[u8]) -> Result<Vec<Field, N>, TokenizeError> {
    let mut out = Vec::new();
    for field in fields(line) {
        out.push(field).map_err(|_| TokenizeError::TooManyFields)?;
    }
    Ok(out)
}

/// Strip trailing CR and/or LF from a line.
#[inline]
#[must_use]
pub fn strip_line_ending(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    if end > 0 && line[end - 1] == b'\n' {
        end -= 1;
    }
    if end > 0 && line[end - 1] == b'\r' {
        end -= 1;
    }
    &line[..end]
}
