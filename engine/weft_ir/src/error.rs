//! Parse errors.
//!
//! Errors are returned, never thrown through the parse stack: the first
//! error aborts the parse and the caller receives a `{ kind, pos }` record.
//! Patterns are short, so a precise first-error position beats best-effort
//! continuation.

/// What went wrong.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ErrorKind {
    /// Unmatched `(`, `)`, `[`, or `{`.
    #[error("unbalanced delimiter")]
    Unbalanced,
    /// Malformed construct: dangling suffix operator, trailing `|`,
    /// unknown `(?...` prefix, bad repetition counts, `\0` backreference.
    #[error("syntax error")]
    Syntax,
    /// Character class range with its endpoints reversed (`[z-a]`).
    #[error("invalid character range")]
    BadRange,
    /// Internal invariant violation. Indicates a bug in the front end.
    #[error("internal error")]
    Internal,
    /// Group or alternation nesting deeper than the configured ceiling.
    #[error("nesting depth limit exceeded")]
    DepthExceeded,
    /// Lookbehind whose body does not have a statically-known width.
    #[error("lookbehind requires a fixed-width body")]
    VariableLookbehind,
}

/// A parse error with the byte offset it was detected at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{kind} at byte {pos}")]
pub struct ParseError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Byte offset into the original pattern.
    pub pos: u32,
}

impl ParseError {
    /// Create a new parse error.
    #[cold]
    pub fn new(kind: ErrorKind, pos: u32) -> Self {
        ParseError { kind, pos }
    }

    /// Unmatched delimiter at `pos`.
    #[cold]
    pub fn unbalanced(pos: u32) -> Self {
        ParseError::new(ErrorKind::Unbalanced, pos)
    }

    /// Malformed construct at `pos`.
    #[cold]
    pub fn syntax(pos: u32) -> Self {
        ParseError::new(ErrorKind::Syntax, pos)
    }

    /// Reversed class range at `pos`.
    #[cold]
    pub fn bad_range(pos: u32) -> Self {
        ParseError::new(ErrorKind::BadRange, pos)
    }

    /// Internal invariant violation at `pos`.
    #[cold]
    pub fn internal(pos: u32) -> Self {
        ParseError::new(ErrorKind::Internal, pos)
    }

    /// Nesting ceiling exceeded at `pos`.
    #[cold]
    pub fn depth_exceeded(pos: u32) -> Self {
        ParseError::new(ErrorKind::DepthExceeded, pos)
    }

    /// Variable-width lookbehind body; `pos` points at the offending
    /// construct inside the body.
    #[cold]
    pub fn variable_lookbehind(pos: u32) -> Self {
        ParseError::new(ErrorKind::VariableLookbehind, pos)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
