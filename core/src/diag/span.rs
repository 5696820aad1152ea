//! Source span helpers used throughout diagnostic reporting.
//!
//! A `Span` tracks byte offsets within a single source buffer and is
//! attached to tokens and errors so callers can surface precise locations.

use miette::SourceSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span covering one character of `len_utf8` bytes at `start`.
    pub const fn single(start: usize, len_utf8: usize) -> Self {
        Self {
            start,
            end: start + len_utf8,
        }
    }

    pub const fn len(self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}
