//! Instruction opcode.
//!
//! # Discriminant Layout
//!
//! Variants are organized into semantic ranges; the two boundary constants
//! [`Op::ARG_START`] and [`Op::INDEX_START`] tell the backend, with one
//! compare, how to interpret an instruction's `val`/`val2` slots while
//! walking the stream:
//!
//! | Range   | Category                                   |
//! |---------|--------------------------------------------|
//! | 0-15    | No argument slots in use                   |
//! | 17-31   | Inline arguments (counts, letters, groups) |
//! | 33-47   | Stream-index arguments (forward links)     |
//! | 255     | Stream terminator                          |

/// Instruction opcode.
///
/// # Representation
///
/// `#[repr(u8)]` keeps the opcode a single byte; the range classifiers
/// below are discriminant compares against the two boundary constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Op {
    // === No argument slots (0-15) ===
    /// Any rune (any rune but newline unless `DOTALL`).
    Dot = 0,
    /// `^` anchor.
    Begin = 1,
    /// `$` anchor.
    End = 2,
    /// `?` greedy optional.
    Opt = 3,
    /// `*` greedy repetition.
    Star = 4,
    /// `+` greedy repetition.
    Plus = 5,
    /// `*?` lazy repetition.
    LazyStar = 6,
    /// `+?` lazy repetition.
    LazyPlus = 7,

    // === Inline arguments (17-31) ===
    /// Literal run; the literal bytes live in the payload, `len` caches
    /// their count.
    Word = 17,
    /// Positive character class; the expanded body lives in the payload.
    Set = 18,
    /// Negated character class (`[^...]`).
    NegSet = 19,
    /// `\s \w \d` family; `val` is the lowercase trigger letter, `val2` is
    /// 1 for the negated (uppercase) form.
    MetaClass = 20,
    /// Backreference; `val` is the 0-based capture index.
    Backref = 21,
    /// `{m}` / `{m,n}`; `val` is the minimum count, `val2` the maximum
    /// (`u32::MAX` for an open `{m,}` bound).
    Repeat = 22,

    // === Stream-index arguments (33-47) ===
    /// Non-capturing group; `val` is the index one past the last child.
    Group = 33,
    /// Capturing group; `val` is the index one past the last child, `val2`
    /// the 0-based capture index.
    CapGroup = 34,
    /// Alternation fork; `val` is the index of the second arm's first
    /// instruction, `val2` the index one past the last arm.
    Or = 35,
    /// Positive lookahead `(?=...)`; `val` is the index past the body.
    Ahead = 36,
    /// Negative lookahead `(?!...)`.
    NegAhead = 37,
    /// Positive lookbehind `(?<=...)`; the body must be fixed-width.
    Behind = 38,
    /// Negative lookbehind `(?<!...)`.
    NegBehind = 39,

    // === Control (255) ===
    /// Stream terminator; exactly one per program, always last.
    Null = 255,
}

impl Op {
    /// Discriminant boundary below the inline-argument range.
    pub const ARG_START: u8 = 16;
    /// Discriminant boundary below the stream-index-argument range.
    pub const INDEX_START: u8 = 32;

    /// Returns `true` if `val`/`val2` carry inline data (counts, letters,
    /// capture numbers) rather than stream indices.
    #[inline]
    #[must_use]
    pub fn has_inline_arg(self) -> bool {
        let d = self as u8;
        d > Self::ARG_START && d < Self::INDEX_START
    }

    /// Returns `true` if `val` (and for [`Op::Or`], `val2`) is a forward
    /// index into the instruction stream.
    #[inline]
    #[must_use]
    pub fn has_index_arg(self) -> bool {
        let d = self as u8;
        d > Self::INDEX_START && d != Self::Null as u8
    }

    /// Returns `true` for the quantifier opcodes.
    #[inline]
    #[must_use]
    pub fn is_quantifier(self) -> bool {
        matches!(
            self,
            Self::Opt | Self::Star | Self::Plus | Self::LazyStar | Self::LazyPlus | Self::Repeat
        )
    }

    /// Returns `true` for the four lookaround opcodes.
    #[inline]
    #[must_use]
    pub fn is_lookaround(self) -> bool {
        matches!(
            self,
            Self::Ahead | Self::NegAhead | Self::Behind | Self::NegBehind
        )
    }

    /// Returns `true` for the two lookbehind opcodes.
    #[inline]
    #[must_use]
    pub fn is_lookbehind(self) -> bool {
        matches!(self, Self::Behind | Self::NegBehind)
    }

    /// Returns a human-readable name for diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Begin => "begin anchor",
            Self::End => "end anchor",
            Self::Opt => "optional",
            Self::Star => "star",
            Self::Plus => "plus",
            Self::LazyStar => "lazy star",
            Self::LazyPlus => "lazy plus",
            Self::Word => "literal",
            Self::Set => "class",
            Self::NegSet => "negated class",
            Self::MetaClass => "meta class",
            Self::Backref => "backreference",
            Self::Repeat => "counted repetition",
            Self::Group => "group",
            Self::CapGroup => "capturing group",
            Self::Or => "alternation",
            Self::Ahead => "lookahead",
            Self::NegAhead => "negative lookahead",
            Self::Behind => "lookbehind",
            Self::NegBehind => "negative lookbehind",
            Self::Null => "terminator",
        }
    }
}

/// Size assertion: `Op` is a single byte.
const _: () = assert!(std::mem::size_of::<Op>() == 1);
