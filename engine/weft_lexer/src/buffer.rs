//! Sentinel-terminated pattern buffer.
//!
//! The pattern is a finite rune sequence terminated by a sentinel zero:
//! the buffer appends a `0x00` byte after the content, so the scanner
//! detects end-of-pattern by value instead of by bounds check. The total
//! size is rounded up to the next 64-byte boundary, which also provides
//! safe zero padding for `peek` near the end.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Sentinel-terminated pattern buffer.
///
/// # Layout
///
/// ```text
/// [pattern_bytes..., 0x00, padding_zeros...]
///  ^                 ^     ^
///  0                 |     rounded up to 64-byte boundary
///              pattern_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct PatternBuffer {
    /// Owned buffer: `[pattern_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the pattern content (excludes sentinel and padding).
    pattern_len: u32,
}

impl PatternBuffer {
    /// Create a new sentinel-terminated buffer from pattern text.
    pub fn new(pattern: &str) -> Self {
        let bytes = pattern.as_bytes();
        let len = bytes.len();

        // Round up to the next 64-byte boundary (minimum: content + sentinel).
        let padded_len = (len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        // Zero-filled allocation: the sentinel and padding are already 0x00.
        let mut buf = vec![0u8; padded_len];
        buf[..len].copy_from_slice(bytes);

        // Patterns beyond 4 GiB saturate; the scanner then reports
        // end-of-pattern at the saturated offset.
        let pattern_len = u32::try_from(len).unwrap_or(u32::MAX);

        Self { buf, pattern_len }
    }

    /// Returns the pattern bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.pattern_len as usize]
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.pattern_len)
    }

    /// Length of the pattern content in bytes.
    pub fn len(&self) -> u32 {
        self.pattern_len
    }

    /// Returns `true` if the pattern is empty.
    pub fn is_empty(&self) -> bool {
        self.pattern_len == 0
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
