//! The flat instruction stream.
//!
//! The lowerer emits a contiguous `Vec<Inst>` ending in a single
//! [`Op::Null`]. The stream is logically a tree: composites (groups,
//! alternations, lookarounds) own the contiguous sub-range up to their
//! stored end index. Walkers follow those indices instead of recursing
//! over a parallel tree, and because links are indices rather than
//! pointers they survive stream relocation.
//!
//! The backend may mark instructions dead while compiling alternation
//! arms; that is the explicit [`Inst::skipped`] flag, which has no effect
//! on ownership or release.

mod op;

pub use op::Op;

use crate::Flags;

/// Sentinel width for "not statically known".
pub const VARIABLE: i32 = -1;

/// Expanded body of a bracketed character class.
///
/// Two parallel halves: the member runes, and one width tag per rune
/// giving its UTF-8 encoded length (1-4). The matcher uses the tags to
/// treat non-ASCII members as multi-unit literals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassBody {
    runes: Vec<char>,
    widths: Vec<u8>,
}

impl ClassBody {
    /// Create an empty class body.
    #[inline]
    pub fn new() -> Self {
        ClassBody::default()
    }

    /// Append a member rune, tagging it with its encoded width.
    #[inline]
    pub fn push(&mut self, rune: char) {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "len_utf8 is always 1-4"
        )]
        self.widths.push(rune.len_utf8() as u8);
        self.runes.push(rune);
    }

    /// The member runes.
    #[inline]
    pub fn runes(&self) -> &[char] {
        &self.runes
    }

    /// Width tags parallel to [`runes`](Self::runes).
    #[inline]
    pub fn widths(&self) -> &[u8] {
        &self.widths
    }

    /// Number of member runes.
    #[inline]
    pub fn len(&self) -> usize {
        self.runes.len()
    }

    /// Check if the class has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runes.is_empty()
    }

    /// Membership test.
    #[inline]
    pub fn contains(&self, rune: char) -> bool {
        self.runes.contains(&rune)
    }
}

/// Owned data attached to an instruction.
///
/// `Word` owns the literal byte run; `Set`/`NegSet` own their expanded
/// class body. Every other opcode carries `None`. Buffers are released
/// when the instruction drops.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Payload {
    /// No owned data.
    #[default]
    None,
    /// Literal bytes for a [`Op::Word`] instruction.
    Literal(Box<[u8]>),
    /// Expanded class for a [`Op::Set`] / [`Op::NegSet`] instruction.
    Class(ClassBody),
}

impl Payload {
    /// The literal bytes, if this is a `Literal` payload.
    #[inline]
    pub fn literal(&self) -> Option<&[u8]> {
        match self {
            Payload::Literal(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// The class body, if this is a `Class` payload.
    #[inline]
    pub fn class(&self) -> Option<&ClassBody> {
        match self {
            Payload::Class(body) => Some(body),
            _ => None,
        }
    }
}

/// A single lowered instruction.
///
/// `val` and `val2` are the two argument slots; their meaning depends on
/// the opcode (see [`Op`]'s per-variant documentation). For opcodes in the
/// index-argument range they are forward indices into the same stream,
/// always strictly greater than this instruction's own index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inst {
    /// What this instruction does.
    pub op: Op,
    /// Marked dead by the backend while compiling; ignored on release.
    pub skipped: bool,
    /// First argument slot.
    pub val: u32,
    /// Second argument slot.
    pub val2: u32,
    /// Cached fixed match width in bytes, or [`VARIABLE`].
    pub len: i32,
    /// Index of the composite instruction this one is a direct child of,
    /// if any. Diagnostic aid only.
    pub owner: Option<u32>,
    /// Owned literal or class data.
    pub payload: Payload,
}

impl Inst {
    /// Create a new instruction with empty argument slots, unknown width,
    /// and no payload.
    #[inline]
    pub fn new(op: Op) -> Self {
        Inst {
            op,
            skipped: false,
            val: 0,
            val2: 0,
            len: VARIABLE,
            owner: None,
            payload: Payload::None,
        }
    }

    /// Mark this instruction dead during backend compilation.
    #[inline]
    pub fn mark_skipped(&mut self) {
        self.skipped = true;
    }

    /// Clear the dead mark.
    #[inline]
    pub fn clear_skipped(&mut self) {
        self.skipped = false;
    }
}

/// Result of lowering a pattern: the instruction stream plus the metadata
/// the backend sizes its runtime structures from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    /// Flat stream, terminated by a single [`Op::Null`].
    pub insts: Vec<Inst>,
    /// Number of capturing groups; capture indices are dense in
    /// `0..groups`, assigned in source order.
    pub groups: u32,
    /// Maximum simultaneously-open group nesting observed during lowering.
    /// The backend sizes its runtime stack from this.
    pub max_depth: u32,
    /// Effective flags: the caller's, plus any set by inline `(?...)`
    /// groups.
    pub flags: Flags,
}

impl Program {
    /// Number of instructions, including the terminator.
    #[inline]
    pub fn len(&self) -> usize {
        self.insts.len()
    }

    /// Check if the program holds no instructions at all.
    ///
    /// A successfully lowered program is never empty; it holds at least
    /// the terminator.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.insts.is_empty()
    }

    /// Get the instruction at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Inst> {
        self.insts.get(index)
    }

    /// Iterate over the stream in emission order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Inst> {
        self.insts.iter()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
