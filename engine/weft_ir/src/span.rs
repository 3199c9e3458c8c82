//! Pattern location spans.
//!
//! Provides the compact 8-byte span used by tokens and errors. Offsets are
//! byte positions into the original pattern text.

use std::fmt;

/// Pattern location span.
///
/// Layout: 8 bytes total
/// - start: u32 - byte offset from pattern start
/// - end: u32 - byte offset (exclusive)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create a point span (zero-length).
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if a byte offset is within this span.
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Extract the spanned text from the pattern.
    ///
    /// # Contract
    ///
    /// The span must have been produced against `pattern` and therefore
    /// falls on character boundaries within it.
    #[inline]
    pub fn text<'a>(&self, pattern: &'a str) -> &'a str {
        &pattern[self.start as usize..self.end as usize]
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Size assertion: spans stay at 8 bytes.
const _: () = assert!(std::mem::size_of::<Span>() == 8);

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
