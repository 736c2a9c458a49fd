//! Byte spans into script source.

use std::ops::Range;

use crate::{Error, Result};

/// Longest source whose offsets fit a span.
pub const MAX_SOURCE_LEN: usize = u32::MAX as usize;

/// Reject sources longer than [`MAX_SOURCE_LEN`] before any span is built.
pub(crate) fn ensure_addressable(len: usize) -> Result<()> {
    if len > MAX_SOURCE_LEN {
        return Err(Error::SourceTooLarge { len });
    }
    Ok(())
}

/// Half-open byte range `[start, end)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Offsets are at most [`MAX_SOURCE_LEN`]; parsing rejects longer sources.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start as u32,
            end: end as u32,
        }
    }

    /// Zero-width span at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Smallest span covering both.
    pub fn cover(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    pub fn range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// Slice `source`. O(1).
    pub fn text(self, source: &str) -> &str {
        &source[self.range()]
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}
