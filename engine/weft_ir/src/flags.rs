//! Match-time configuration flags.

bitflags::bitflags! {
    /// Match-time configuration, recognized both at the API entry and via
    /// inline `(?...)` prefixes.
    ///
    /// Inline groups only ever *add* flags: `(?i)` and `(?s)` mutate the
    /// parse-global flag set and emit no instruction.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        /// ASCII case-insensitive matching (`(?i)`).
        const ICASE = 1 << 0;
        /// `.` also matches newline (`(?s)`).
        const DOTALL = 1 << 1;
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
