//! Token kind produced by the pattern tokenizer.
//!
//! # Discriminant Layout
//!
//! Variants are organized into semantic ranges; the structure analyzer
//! relies on the ordering, not just the identity, of the ranges:
//!
//! | Range | Category |
//! |-------|----------|
//! | 0-15  | Atoms & delimiters |
//! | 16    | Alternation bar |
//! | 33-36 | Suffix operators (strictly above `SUFFIX_START`) |
//!
//! The alternation bar sits strictly below [`TokenKind::SUFFIX_START`] and
//! the four suffix operators strictly above it, so "is this a suffix?" is a
//! single discriminant comparison.

/// Token kind produced by the pattern tokenizer.
///
/// # Representation
///
/// `#[repr(u8)]` keeps each kind a single byte and makes the range-based
/// classifiers below cheap discriminant compares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    // === Atoms & delimiters (0-15) ===
    /// Literal rune run (coalesced).
    Word = 0,
    /// `^`
    Caret = 1,
    /// `$`
    Dollar = 2,
    /// `.`
    Dot = 3,
    /// `[...]` class body (span starts past `[` and an optional `^`).
    Set = 4,
    /// `\s \S \w \W \d \D`
    MetaClass = 5,
    /// `\` followed by a decimal digit.
    Backref = 6,
    /// `(`
    LParen = 7,
    /// `)`
    RParen = 8,

    // === Alternation (16) ===
    /// `|`
    Pipe = 16,

    // === Suffix operators (33-36) ===
    /// `?`
    Question = 33,
    /// `*`
    Star = 34,
    /// `+`
    Plus = 35,
    /// `{m}` or `{m,n}` (span includes the braces).
    Repeat = 36,
}

impl TokenKind {
    /// Marker discriminant separating suffix operators from everything else.
    ///
    /// `Pipe` is strictly below this value; `Question`, `Star`, `Plus`, and
    /// `Repeat` are strictly above it.
    pub const SUFFIX_START: u8 = 32;

    /// Returns `true` for the suffix operators `? * + {m,n}`.
    ///
    /// A suffix operator binds to the preceding atom (or the preceding
    /// group as a whole).
    #[inline]
    #[must_use]
    pub fn is_suffix(self) -> bool {
        self as u8 > Self::SUFFIX_START
    }

    /// Returns `true` for tokens that can be quantified: everything except
    /// the alternation bar, the group delimiters, and the suffix operators
    /// themselves.
    #[inline]
    #[must_use]
    pub fn is_atom(self) -> bool {
        (self as u8) < Self::LParen as u8
    }

    /// Returns a human-readable name for diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Word => "literal",
            Self::Caret => "`^`",
            Self::Dollar => "`$`",
            Self::Dot => "`.`",
            Self::Set => "character class",
            Self::MetaClass => "meta class",
            Self::Backref => "backreference",
            Self::LParen => "`(`",
            Self::RParen => "`)`",
            Self::Pipe => "`|`",
            Self::Question => "`?`",
            Self::Star => "`*`",
            Self::Plus => "`+`",
            Self::Repeat => "counted repetition",
        }
    }
}

/// Size assertion: `TokenKind` is a single byte.
const _: () = assert!(std::mem::size_of::<TokenKind>() == 1);
